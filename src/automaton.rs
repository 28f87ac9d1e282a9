use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{alphabet::Label, math::Bijection, Alphabet, ValidationError};

mod state;
pub use state::{State, StateId};

mod transition;
pub use transition::{Transition, TransitionId, TransitionItem};

mod event;
pub use event::{Event, Listeners, TransitionChange};

/// An editable finite automaton. It owns its [`State`]s and [`Transition`]s, the [`Alphabet`]
/// and an optional start state.
///
/// States and transitions live in flat slot vectors and are addressed by [`StateId`] and
/// [`TransitionId`]. A transition only stores the handles of its endpoints, while each state
/// keeps the handles of the transitions leaving it. Names are resolved to handles through a
/// bijection, which also guarantees that names are unique.
///
/// Every mutation either succeeds completely or returns a [`ValidationError`] and leaves the
/// automaton untouched. Successful mutations are reported to subscribers as [`Event`]s.
///
/// # Example
/// ```
/// use automata_sim::prelude::*;
///
/// let mut aut = Automaton::for_alphabet(Alphabet::parse("0,1").unwrap());
/// let q0 = aut.add_state("q0").unwrap(); // the first state becomes the start state
/// let q1 = aut.add_state("q1").unwrap();
/// aut.set_accepting(q1, true).unwrap();
/// aut.add_transition(q0, q1, '1').unwrap();
/// aut.add_transition(q1, q1, '0').unwrap();
/// aut.add_transition(q1, q1, '1').unwrap();
/// aut.add_transition(q0, q0, '0').unwrap();
///
/// assert!(aut.accepts("1011"));
/// assert!(!aut.accepts("0"));
/// ```
#[derive(Clone, Default)]
pub struct Automaton {
    alphabet: Alphabet,
    states: Vec<Option<State>>,
    transitions: Vec<Option<Transition>>,
    names: Bijection<String, StateId>,
    start: Option<StateId>,
    listeners: Listeners<'static>,
}

impl Automaton {
    /// Creates an empty automaton over the empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty automaton over the given alphabet.
    pub fn for_alphabet(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            ..Default::default()
        }
    }

    /// Registers a subscriber which is called with every [`Event`] caused by an edit.
    pub fn subscribe<F: FnMut(&Event) + 'static>(&mut self, subscriber: F) {
        self.listeners.subscribe(subscriber);
    }

    /// The alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Handle of the start state, if there is one.
    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    /// The start state, if there is one.
    pub fn start_state(&self) -> Option<&State> {
        self.start.and_then(|q| self.state(q))
    }

    /// Returns the state behind `id`, or `None` if it does not exist (anymore).
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0)?.as_ref()
    }

    fn state_mut(&mut self, id: StateId) -> Option<&mut State> {
        self.states.get_mut(id.0)?.as_mut()
    }

    /// Returns true if `id` refers to an existing state.
    pub fn contains_state(&self, id: StateId) -> bool {
        self.state(id).is_some()
    }

    /// Looks up a state by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get_by_left(name).copied()
    }

    /// The name of the state behind `id`.
    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.state(id).map(State::name)
    }

    /// Iterates over all states in the order in which they were created.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(i, q)| q.as_ref().map(|q| (StateId(i), q)))
    }

    /// Iterates over the handles of all states.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states().map(|(id, _)| id)
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there are no states.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the transition behind `id`, or `None` if it does not exist (anymore).
    pub fn transition(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(id.0)?.as_ref()
    }

    fn transition_mut(&mut self, id: TransitionId) -> Option<&mut Transition> {
        self.transitions.get_mut(id.0)?.as_mut()
    }

    /// Iterates over all transitions in the order in which they were created.
    pub fn transitions(&self) -> impl Iterator<Item = (TransitionId, &Transition)> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_ref().map(|t| (TransitionId(i), t)))
    }

    /// The number of transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions().count()
    }

    /// Iterates over the transitions leaving `state`. Yields nothing if the state does not exist.
    pub fn transitions_from(
        &self,
        state: StateId,
    ) -> impl Iterator<Item = (TransitionId, &Transition)> + '_ {
        self.state(state).into_iter().flat_map(move |q| {
            q.outgoing
                .iter()
                .filter_map(move |&id| self.transition(id).map(|t| (id, t)))
        })
    }

    /// Returns the transition leading from `from` to `to`, there is at most one.
    pub fn transition_between(&self, from: StateId, to: StateId) -> Option<TransitionId> {
        self.transitions_from(from)
            .find(|(_, t)| t.target == to)
            .map(|(id, _)| id)
    }

    fn emit(&mut self, event: Event) {
        if !self.listeners.is_empty() {
            self.listeners.emit(&event);
        }
    }

    fn transition_event(id: TransitionId, transition: &Transition, change: TransitionChange) -> Event {
        Event::TransitionChanged {
            id,
            source: transition.source,
            target: transition.target,
            labels: transition.labels.clone(),
            change,
        }
    }

    fn validate_name(&self, name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if self.names.contains_left(name) {
            return Err(ValidationError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Creates a new state without outgoing transitions. Fails if `name` is blank or already
    /// taken. If the automaton has no start state yet, the new state becomes the start state.
    pub fn add_state<N: Into<String>>(&mut self, name: N) -> Result<StateId, ValidationError> {
        let name = name.into();
        self.validate_name(&name)?;
        Ok(self.insert_state(name))
    }

    /// Adds a state whose name is known to be valid and unused.
    pub(crate) fn insert_state(&mut self, name: String) -> StateId {
        let id = StateId(self.states.len());
        debug!("adding state {id} \"{name}\"");
        self.states.push(Some(State::new(name.clone())));
        self.names.insert(name.clone(), id);
        self.emit(Event::StateAdded { id, name });
        if self.start.is_none() {
            self.replace_start(Some(id));
        }
        id
    }

    /// Gives the state `id` a new name, subject to the same rules as [`Automaton::add_state`].
    /// Renaming a state to its current name does nothing.
    pub fn rename_state<N: Into<String>>(
        &mut self,
        id: StateId,
        name: N,
    ) -> Result<(), ValidationError> {
        let name = name.into();
        let current = self.state(id).ok_or(ValidationError::UnknownState(id))?;
        if current.name == name {
            return Ok(());
        }
        self.validate_name(&name)?;

        debug!("renaming state {id} to \"{name}\"");
        self.names.remove_by_right(&id);
        self.names.insert(name.clone(), id);
        if let Some(state) = self.state_mut(id) {
            state.name = name;
        }
        self.emit(Event::StateChanged { id });
        Ok(())
    }

    /// Sets whether the state `id` is accepting.
    pub fn set_accepting(&mut self, id: StateId, accepting: bool) -> Result<(), ValidationError> {
        let state = self.state_mut(id).ok_or(ValidationError::UnknownState(id))?;
        if state.accepting != accepting {
            state.accepting = accepting;
            self.emit(Event::StateChanged { id });
        }
        Ok(())
    }

    /// Flips the accepting flag of `id` and returns the new value.
    pub fn toggle_accepting(&mut self, id: StateId) -> Result<bool, ValidationError> {
        let accepting = !self
            .state(id)
            .ok_or(ValidationError::UnknownState(id))?
            .accepting;
        self.set_accepting(id, accepting)?;
        Ok(accepting)
    }

    /// Makes `id` the start state.
    pub fn set_start(&mut self, id: StateId) -> Result<(), ValidationError> {
        if !self.contains_state(id) {
            return Err(ValidationError::UnknownState(id));
        }
        self.replace_start(Some(id));
        Ok(())
    }

    /// Leaves the automaton without a start state.
    pub fn clear_start(&mut self) {
        self.replace_start(None);
    }

    fn replace_start(&mut self, start: Option<StateId>) {
        if self.start != start {
            trace!("start state is now {start:?}");
            self.start = start;
            self.emit(Event::StartChanged { start });
        }
    }

    /// Adds `label` to the transition from `from` to `to`, creating the transition if there is
    /// none yet. The label must be ε or a symbol of the alphabet.
    pub fn add_transition<L: Into<Label>>(
        &mut self,
        from: StateId,
        to: StateId,
        label: L,
    ) -> Result<TransitionId, ValidationError> {
        let label = label.into();
        for q in [from, to] {
            if !self.contains_state(q) {
                return Err(ValidationError::UnknownState(q));
            }
        }
        if let Label::Symbol(sym) = label {
            if !self.alphabet.contains(sym) {
                return Err(ValidationError::SymbolNotInAlphabet(sym));
            }
        }
        Ok(self.link(from, to, label))
    }

    /// Adds a label between two existing states, merging into an existing transition.
    pub(crate) fn link(&mut self, from: StateId, to: StateId, label: Label) -> TransitionId {
        if let Some(id) = self.transition_between(from, to) {
            if let Some(transition) = self.transition_mut(id) {
                if transition.labels.insert(label) {
                    trace!("added {label} to transition {id}");
                    let event =
                        Self::transition_event(id, transition, TransitionChange::LabelsChanged);
                    self.emit(event);
                }
            }
            return id;
        }

        let id = TransitionId(self.transitions.len());
        let transition = Transition::new(from, to, label);
        let event = Self::transition_event(id, &transition, TransitionChange::Created);
        self.transitions.push(Some(transition));
        if let Some(source) = self.state_mut(from) {
            source.outgoing.push(id);
        }
        debug!("created transition {id} from {from} to {to} on {label}");
        self.emit(event);
        id
    }

    /// Removes `label` from the transition `id`. If that was its last label, the transition is
    /// deleted. Removing a label the transition does not carry does nothing.
    pub fn remove_symbol<L: Into<Label>>(
        &mut self,
        id: TransitionId,
        label: L,
    ) -> Result<(), ValidationError> {
        let label = label.into();
        let transition = self
            .transition_mut(id)
            .ok_or(ValidationError::UnknownTransition(id))?;
        if !transition.labels.remove(&label) {
            return Ok(());
        }
        trace!("removed {label} from transition {id}");

        if transition.labels.is_empty() {
            self.delete_transition(id);
        } else {
            let event = Self::transition_event(id, transition, TransitionChange::LabelsChanged);
            self.emit(event);
        }
        Ok(())
    }

    /// Deletes the transition `id` together with all of its labels.
    pub fn remove_transition(&mut self, id: TransitionId) -> Result<Transition, ValidationError> {
        self.delete_transition(id)
            .ok_or(ValidationError::UnknownTransition(id))
    }

    fn delete_transition(&mut self, id: TransitionId) -> Option<Transition> {
        let transition = self.transitions.get_mut(id.0)?.take()?;
        if let Some(source) = self.state_mut(transition.source) {
            source.outgoing.retain(|&t| t != id);
        }
        debug!("deleted transition {id}");
        self.emit(Event::TransitionChanged {
            id,
            source: transition.source,
            target: transition.target,
            labels: BTreeSet::new(),
            change: TransitionChange::Removed,
        });
        Some(transition)
    }

    /// Removes the state `id` after deleting every transition entering or leaving it. If it was
    /// the start state, the automaton is left without one.
    pub fn remove_state(&mut self, id: StateId) -> Result<State, ValidationError> {
        if !self.contains_state(id) {
            return Err(ValidationError::UnknownState(id));
        }
        let adjacent = self
            .transitions()
            .filter(|(_, t)| t.source == id || t.target == id)
            .map(|(t, _)| t)
            .collect_vec();
        for t in adjacent {
            self.delete_transition(t);
        }

        let state = self
            .states
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(ValidationError::UnknownState(id))?;
        self.names.remove_by_right(&id);
        debug!("removed state {id} \"{}\"", state.name);
        self.emit(Event::StateRemoved {
            id,
            name: state.name.clone(),
        });

        if self.start == Some(id) {
            self.replace_start(None);
        }
        Ok(state)
    }

    /// Replaces the alphabet. Every label that is neither ε nor part of the new alphabet is
    /// stripped from its transition, and transitions that are left without labels are deleted.
    pub fn set_alphabet(&mut self, alphabet: Alphabet) {
        debug!("setting alphabet to {{{alphabet}}}");
        self.alphabet = alphabet;
        self.emit(Event::AlphabetChanged {
            alphabet: self.alphabet.clone(),
        });

        let alphabet = &self.alphabet;
        let mut relabeled = vec![];
        let mut emptied = vec![];
        for (i, slot) in self.transitions.iter_mut().enumerate() {
            let Some(transition) = slot else {
                continue;
            };
            let before = transition.labels.len();
            transition.labels.retain(|label| alphabet.permits(label));
            if transition.labels.is_empty() {
                emptied.push(TransitionId(i));
            } else if transition.labels.len() != before {
                relabeled.push(TransitionId(i));
            }
        }

        for id in relabeled {
            if let Some(transition) = self.transition(id) {
                let event = Self::transition_event(id, transition, TransitionChange::LabelsChanged);
                self.emit(event);
            }
        }
        for id in emptied {
            self.delete_transition(id);
        }
    }

    /// The labels that can still be added between `from` and `to`: every symbol of the alphabet
    /// and ε, minus the labels the transition between the two already carries.
    pub fn available_symbols(&self, from: StateId, to: StateId) -> BTreeSet<Label> {
        let taken = self
            .transition_between(from, to)
            .and_then(|id| self.transition(id))
            .map(|t| t.labels.clone())
            .unwrap_or_default();
        self.alphabet
            .labels()
            .filter(|label| !taken.contains(label))
            .collect()
    }

    /// Lists every (transition, label) pair of the automaton.
    pub fn transition_items(&self) -> Vec<TransitionItem<'_>> {
        self.items(self.transitions())
    }

    /// Lists the (transition, label) pairs leaving `state`.
    pub fn transition_items_from(&self, state: StateId) -> Vec<TransitionItem<'_>> {
        self.items(self.transitions_from(state))
    }

    fn items<'a, I>(&'a self, transitions: I) -> Vec<TransitionItem<'a>>
    where
        I: Iterator<Item = (TransitionId, &'a Transition)>,
    {
        transitions
            .flat_map(|(id, t)| {
                let source = self.state_name(t.source).unwrap_or_default();
                let target = self.state_name(t.target).unwrap_or_default();
                t.labels.iter().map(move |&label| TransitionItem {
                    transition: id,
                    source,
                    label,
                    target,
                })
            })
            .collect()
    }

    /// Removes all states and transitions and empties the alphabet. Subscribers stay registered.
    pub fn clear(&mut self) {
        for id in self.state_ids().collect_vec() {
            let _ = self.remove_state(id);
        }
        self.set_alphabet(Alphabet::new());
    }
}

impl PartialEq for Automaton {
    /// Two automata are equal if they have the same alphabet, the same states (by name and
    /// accepting flag), the same labeled transitions between those names and the same start
    /// state name. Handles and creation order are irrelevant.
    fn eq(&self, other: &Self) -> bool {
        fn states(aut: &Automaton) -> BTreeSet<(&str, bool)> {
            aut.states().map(|(_, q)| (q.name(), q.accepting)).collect()
        }
        fn transitions(aut: &Automaton) -> BTreeSet<(&str, &str, &BTreeSet<Label>)> {
            aut.transitions()
                .map(|(_, t)| {
                    (
                        aut.state_name(t.source).unwrap_or_default(),
                        aut.state_name(t.target).unwrap_or_default(),
                        &t.labels,
                    )
                })
                .collect()
        }

        self.alphabet == other.alphabet
            && self.start_state().map(State::name) == other.start_state().map(State::name)
            && states(self) == states(other)
            && transitions(self) == transitions(other)
    }
}

impl Eq for Automaton {}

impl std::fmt::Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("alphabet", &format_args!("{{{}}}", self.alphabet))
            .field(
                "states",
                &self
                    .states()
                    .map(|(_, q)| format!("{}{}", q.name, if q.accepting { "*" } else { "" }))
                    .collect_vec(),
            )
            .field(
                "transitions",
                &self
                    .transition_items()
                    .iter()
                    .map(ToString::to_string)
                    .collect_vec(),
            )
            .field("start", &self.start_state().map(State::name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn binary() -> Automaton {
        Automaton::for_alphabet(Alphabet::parse("0,1").unwrap())
    }

    fn recorded(aut: &mut Automaton) -> Rc<RefCell<Vec<Event>>> {
        let log = Rc::new(RefCell::new(vec![]));
        let sink = Rc::clone(&log);
        aut.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn state_names_are_validated() {
        let mut aut = binary();
        let q0 = aut.add_state("q0").unwrap();
        assert_eq!(aut.add_state("   "), Err(ValidationError::BlankName));
        assert_eq!(
            aut.add_state("q0"),
            Err(ValidationError::DuplicateName("q0".into()))
        );
        assert_eq!(aut.size(), 1);
        assert_eq!(aut.state_id("q0"), Some(q0));
        assert!(aut.state(q0).unwrap().outgoing().is_empty());
    }

    #[test]
    fn first_state_becomes_start() {
        let mut aut = binary();
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        assert_eq!(aut.start(), Some(q0));
        aut.set_start(q1).unwrap();
        assert_eq!(aut.start_state().map(State::name), Some("q1"));
    }

    #[test]
    fn labels_merge_into_one_transition() {
        let mut aut = binary();
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        let t = aut.add_transition(q0, q1, '0').unwrap();
        assert_eq!(aut.add_transition(q0, q1, '1'), Ok(t));
        assert_eq!(aut.add_transition(q0, q1, Label::Epsilon), Ok(t));
        assert_eq!(aut.transition_count(), 1);
        assert_eq!(aut.transition(t).unwrap().labels().len(), 3);
        assert_eq!(aut.state(q0).unwrap().outgoing(), &[t]);

        let back = aut.add_transition(q1, q0, '0').unwrap();
        assert_ne!(back, t);
    }

    #[test]
    fn failed_transition_changes_nothing() {
        let mut aut = binary();
        let q0 = aut.add_state("q0").unwrap();
        let log = recorded(&mut aut);
        assert_eq!(
            aut.add_transition(q0, q0, 'x'),
            Err(ValidationError::SymbolNotInAlphabet('x'))
        );
        assert_eq!(
            aut.add_transition(q0, StateId(7), '0'),
            Err(ValidationError::UnknownState(StateId(7)))
        );
        assert_eq!(aut.transition_count(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn removing_last_label_deletes_transition() {
        let mut aut = binary();
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        let t = aut.add_transition(q0, q1, '0').unwrap();
        aut.add_transition(q0, q1, '1').unwrap();

        aut.remove_symbol(t, '0').unwrap();
        assert!(aut.transition(t).is_some());
        aut.remove_symbol(t, '1').unwrap();
        assert!(aut.transition(t).is_none());
        assert!(aut.state(q0).unwrap().outgoing().is_empty());
        assert_eq!(aut.transition_count(), 0);
        assert_eq!(
            aut.remove_symbol(t, '1'),
            Err(ValidationError::UnknownTransition(t))
        );
    }

    #[test]
    fn removing_state_cascades() {
        let mut aut = binary();
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        let q2 = aut.add_state("q2").unwrap();
        aut.add_transition(q0, q1, '0').unwrap();
        aut.add_transition(q1, q0, '1').unwrap();
        let kept = aut.add_transition(q1, q2, '1').unwrap();
        aut.add_transition(q2, q2, '0').unwrap();

        let log = recorded(&mut aut);
        let removed = aut.remove_state(q0).unwrap();
        assert_eq!(removed.name(), "q0");
        assert_eq!(aut.start(), None);
        assert_eq!(aut.transition_count(), 2);
        assert_eq!(aut.state(q1).unwrap().outgoing(), &[kept]);
        assert_eq!(aut.state_id("q0"), None);

        let events = log.borrow();
        assert!(matches!(
            events.last(),
            Some(Event::StartChanged { start: None })
        ));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(
                    e,
                    Event::TransitionChanged {
                        change: TransitionChange::Removed,
                        ..
                    }
                ))
                .count(),
            2
        );
        drop(events);

        // the start state is never reassigned implicitly
        aut.remove_state(q2).unwrap();
        assert_eq!(aut.start(), None);
    }

    #[test]
    fn narrowing_alphabet_prunes_but_keeps_epsilon() {
        let mut aut = Automaton::for_alphabet(Alphabet::parse("a,b").unwrap());
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        let only_b = aut.add_transition(q0, q1, 'b').unwrap();
        let mixed = aut.add_transition(q1, q0, 'a').unwrap();
        aut.add_transition(q1, q0, 'b').unwrap();
        let eps = aut.add_transition(q0, q0, Label::Epsilon).unwrap();
        aut.add_transition(q0, q0, 'b').unwrap();

        aut.set_alphabet(Alphabet::parse("a").unwrap());

        assert!(aut.transition(only_b).is_none());
        assert_eq!(
            aut.transition(mixed).unwrap().labels(),
            &BTreeSet::from([Label::Symbol('a')])
        );
        assert_eq!(
            aut.transition(eps).unwrap().labels(),
            &BTreeSet::from([Label::Epsilon])
        );
        assert!(aut
            .transitions()
            .all(|(_, t)| t.labels().iter().all(|l| aut.alphabet().permits(l))));
    }

    #[test]
    fn rename_and_accepting() {
        let mut aut = binary();
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        assert_eq!(
            aut.rename_state(q0, "q1"),
            Err(ValidationError::DuplicateName("q1".into()))
        );
        assert_eq!(aut.rename_state(q0, ""), Err(ValidationError::BlankName));
        aut.rename_state(q0, "q0").unwrap();
        aut.rename_state(q0, "start").unwrap();
        assert_eq!(aut.state_id("start"), Some(q0));
        assert_eq!(aut.state_id("q0"), None);

        assert_eq!(aut.toggle_accepting(q1), Ok(true));
        assert!(aut.state(q1).unwrap().is_accepting());
        assert_eq!(aut.toggle_accepting(q1), Ok(false));
    }

    #[test]
    fn available_symbols_and_items() {
        let mut aut = binary();
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        aut.add_transition(q0, q1, '1').unwrap();
        aut.add_transition(q0, q1, Label::Epsilon).unwrap();

        assert_eq!(
            aut.available_symbols(q0, q1),
            BTreeSet::from([Label::Symbol('0')])
        );
        assert_eq!(aut.available_symbols(q1, q0).len(), 3);

        let items = aut
            .transition_items()
            .iter()
            .map(ToString::to_string)
            .collect_vec();
        assert_eq!(items, vec!["δ(q0, ε) = q1", "δ(q0, 1) = q1"]);
        assert!(aut.transition_items_from(q1).is_empty());
    }

    #[test_log::test]
    fn events_are_emitted_in_order() {
        let mut aut = binary();
        let log = recorded(&mut aut);
        let q0 = aut.add_state("q0").unwrap();
        let t = aut.add_transition(q0, q0, '0').unwrap();
        aut.add_transition(q0, q0, '0').unwrap();

        let log = log.borrow();
        assert_eq!(
            log.as_slice(),
            &[
                Event::StateAdded {
                    id: q0,
                    name: "q0".into()
                },
                Event::StartChanged { start: Some(q0) },
                Event::TransitionChanged {
                    id: t,
                    source: q0,
                    target: q0,
                    labels: BTreeSet::from([Label::Symbol('0')]),
                    change: TransitionChange::Created,
                },
            ]
        );
    }

    #[test]
    fn clear_and_equality() {
        let mut left = binary();
        let a = left.add_state("a").unwrap();
        let b = left.add_state("b").unwrap();
        left.add_transition(a, b, '0').unwrap();

        let mut right = binary();
        let b2 = right.add_state("b").unwrap();
        let a2 = right.add_state("a").unwrap();
        right.set_start(a2).unwrap();
        right.add_transition(a2, b2, '0').unwrap();
        assert_eq!(left, right);

        right.set_accepting(b2, true).unwrap();
        assert_ne!(left, right);

        left.clear();
        assert!(left.is_empty());
        assert_eq!(left.transition_count(), 0);
        assert_eq!(left, Automaton::new());
    }
}
