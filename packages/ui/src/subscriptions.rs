//! # Optimistic subscribe / unsubscribe
//!
//! [`OptimisticSubscriptionController`] owns the list of subjects a view shows,
//! annotated with the caller's subscription, and applies subscribe/unsubscribe
//! actions before the server has answered.
//!
//! ## Protocol
//!
//! 1. Apply a speculative edit to the local list.
//! 2. Publish the edited list, synchronously, before the request is sent.
//! 3. Send the request.
//! 4. On success, keep the speculative state. The placeholder
//!    [`Subscription::pending`] stays until the next full load replaces it.
//! 5. On failure, undo the edit, publish again and log a warning. Failures
//!    never reach the caller as errors; the returned [`MutationOutcome`] only
//!    says what happened.
//!
//! | View | subscribe | unsubscribe | undo on failure |
//! |------|-----------|-------------|-----------------|
//! | [`SubjectView::All`] | annotate with the placeholder | annotation → `None` | subscribe: `None`; unsubscribe: previous record (placeholder if none) |
//! | [`SubjectView::Subscribed`] | no local change | remove the subject | unsubscribe: reinsert at its former position |
//!
//! ## Overlapping requests
//!
//! Nothing is queued, coalesced or cancelled: two quick clicks send two
//! requests. With [`MutationOrdering::Unsequenced`] every failure undoes its own
//! edit, so whichever response lands last decides the final state. With
//! [`MutationOrdering::Sequenced`] each action bumps a per-subject generation.
//! A failure whose action has since been superseded leaves the newer state
//! alone; the newest failure falls back to the last state the server accepted
//! rather than to whatever an older, still unanswered action had guessed. Once
//! every action on a subject has settled, the subject shows that state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use api::{ApiClient, ApiError, Transport};
use store::{Subject, Subscription};

use crate::observable::{Observable, Watch};

/// Remote operations the controller depends on.
pub trait SubscriptionService {
    fn user_subscriptions(&self) -> impl Future<Output = Result<Vec<Subscription>, ApiError>>;
    fn subjects(&self) -> impl Future<Output = Result<Vec<Subject>, ApiError>>;
    fn subscribe(&self, subject_id: i64) -> impl Future<Output = Result<(), ApiError>>;
    fn unsubscribe(&self, subject_id: i64) -> impl Future<Output = Result<(), ApiError>>;
}

impl<T: Transport> SubscriptionService for ApiClient<T> {
    async fn user_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        ApiClient::user_subscriptions(self).await
    }

    async fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
        ApiClient::subjects(self).await
    }

    async fn subscribe(&self, subject_id: i64) -> Result<(), ApiError> {
        ApiClient::subscribe(self, subject_id).await
    }

    async fn unsubscribe(&self, subject_id: i64) -> Result<(), ApiError> {
        ApiClient::unsubscribe(self, subject_id).await
    }
}

/// Which subjects a list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubjectView {
    /// Every subject, annotated with the caller's subscription.
    #[default]
    All,
    /// Only subjects the caller is subscribed to (profile page).
    Subscribed,
}

/// How overlapping actions on the same subject are reconciled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MutationOrdering {
    /// Every failure reverts its own edit; the last response to land wins.
    #[default]
    Unsequenced,
    /// A failure reverts only if no later action touched the same subject.
    Sequenced,
}

/// What an optimistic action ended up doing to the local list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted; the speculative state stands.
    Confirmed,
    /// The server refused or was unreachable; the edit was undone.
    RolledBack,
    /// The request failed but a later action owns the subject now.
    Superseded,
}

/// Join `subjects` with `subscriptions` by subject id. In the subscribed view
/// subjects without a subscription are dropped. Order is preserved.
pub fn annotate(
    subjects: Vec<Subject>,
    subscriptions: &[Subscription],
    view: SubjectView,
) -> Vec<Subject> {
    subjects
        .into_iter()
        .filter_map(|mut subject| {
            let subscription = subscriptions
                .iter()
                .find(|s| s.subject_id == subject.id)
                .cloned();
            if view == SubjectView::Subscribed && subscription.is_none() {
                return None;
            }
            subject.subscription_by_user = subscription;
            Some(subject)
        })
        .collect()
}

/// How to undo one speculative edit.
#[derive(Debug)]
enum Undo {
    Nothing,
    Annotate {
        subject_id: i64,
        restore: Option<Subscription>,
    },
    Reinsert {
        index: usize,
        subject: Subject,
    },
}

impl Undo {
    fn apply(self, subjects: &mut Vec<Subject>) {
        match self {
            Undo::Nothing => {}
            Undo::Annotate {
                subject_id,
                restore,
            } => {
                if let Some(subject) = subjects.iter_mut().find(|s| s.id == subject_id) {
                    subject.subscription_by_user = restore;
                }
            }
            Undo::Reinsert { index, subject } => {
                if subjects.iter().all(|s| s.id != subject.id) {
                    let index = index.min(subjects.len());
                    subjects.insert(index, subject);
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Subscribe,
    Unsubscribe,
}

impl Action {
    /// The entry once the server has accepted this action.
    fn confirm(
        self,
        entry: Option<(usize, Subject)>,
        view: SubjectView,
    ) -> Option<(usize, Subject)> {
        match (self, view) {
            (Action::Subscribe, SubjectView::All) => entry.map(|(index, mut subject)| {
                subject.subscription_by_user = Some(Subscription::pending(subject.id));
                (index, subject)
            }),
            (Action::Subscribe, SubjectView::Subscribed) => entry,
            (Action::Unsubscribe, SubjectView::All) => entry.map(|(index, mut subject)| {
                subject.subscription_by_user = None;
                (index, subject)
            }),
            (Action::Unsubscribe, SubjectView::Subscribed) => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Subscribe => write!(f, "subscribe to"),
            Action::Unsubscribe => write!(f, "unsubscribe from"),
        }
    }
}

fn entry(subjects: &[Subject], subject_id: i64) -> Option<(usize, Subject)> {
    subjects
        .iter()
        .position(|s| s.id == subject_id)
        .map(|index| (index, subjects[index].clone()))
}

/// Per-subject bookkeeping for overlapping actions.
#[derive(Debug, Default)]
struct Track {
    latest: u64,
    in_flight: usize,
    confirmed_generation: u64,
    /// Position and state the server is known to agree with.
    confirmed: Option<(usize, Subject)>,
}

struct ControllerInner<S> {
    service: S,
    view: SubjectView,
    ordering: MutationOrdering,
    subjects: Observable<Vec<Subject>>,
    tracks: RefCell<HashMap<i64, Track>>,
}

/// Subject list with optimistic subscription actions.
pub struct OptimisticSubscriptionController<S> {
    inner: Rc<ControllerInner<S>>,
}

impl<S> Clone for OptimisticSubscriptionController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: SubscriptionService> OptimisticSubscriptionController<S> {
    pub fn new(service: S, view: SubjectView) -> Self {
        Self::with_ordering(service, view, MutationOrdering::default())
    }

    pub fn with_ordering(service: S, view: SubjectView, ordering: MutationOrdering) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                service,
                view,
                ordering,
                subjects: Observable::new(Vec::new()),
                tracks: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn view(&self) -> SubjectView {
        self.inner.view
    }

    pub fn ordering(&self) -> MutationOrdering {
        self.inner.ordering
    }

    /// Snapshot of the current list.
    pub fn subjects(&self) -> Vec<Subject> {
        self.inner.subjects.get()
    }

    /// The list now, then every published change.
    pub fn observe(&self) -> Watch<Vec<Subject>> {
        self.inner.subjects.subscribe()
    }

    /// Fetch subscriptions and subjects, join them and publish the result.
    /// On failure nothing is published and the error is returned.
    pub async fn load_subjects(&self) -> Result<(), ApiError> {
        let subscriptions = self
            .inner
            .service
            .user_subscriptions()
            .await
            .inspect_err(|e| tracing::warn!("Failed to load subscriptions: {}", e))?;
        let subjects = self
            .inner
            .service
            .subjects()
            .await
            .inspect_err(|e| tracing::warn!("Failed to load subjects: {}", e))?;

        let joined = annotate(subjects, &subscriptions, self.inner.view);
        tracing::debug!("Loaded {} subjects", joined.len());
        self.inner.subjects.set(joined);
        Ok(())
    }

    /// Subscribe to `subject_id`, showing the result before the server answers.
    pub async fn subscribe(&self, subject_id: i64) -> MutationOutcome {
        let view = self.inner.view;
        let (generation, undo) = self.inner.subjects.update(|subjects| {
            let generation = self.begin(subject_id, subjects);
            let undo = match view {
                SubjectView::All => match subjects.iter_mut().find(|s| s.id == subject_id) {
                    Some(subject) => {
                        subject.subscription_by_user = Some(Subscription::pending(subject_id));
                        Undo::Annotate {
                            subject_id,
                            restore: None,
                        }
                    }
                    None => Undo::Nothing,
                },
                // Membership of "my subjects" changes only on the next full load.
                SubjectView::Subscribed => Undo::Nothing,
            };
            (generation, undo)
        });

        let result = self.inner.service.subscribe(subject_id).await;
        self.settle(Action::Subscribe, subject_id, generation, undo, result)
    }

    /// Unsubscribe from `subject_id`, showing the result before the server answers.
    pub async fn unsubscribe(&self, subject_id: i64) -> MutationOutcome {
        let view = self.inner.view;
        let (generation, undo) = self.inner.subjects.update(|subjects| {
            let generation = self.begin(subject_id, subjects);
            let undo = match view {
                SubjectView::All => match subjects.iter_mut().find(|s| s.id == subject_id) {
                    Some(subject) => {
                        let previous = subject.subscription_by_user.take();
                        Undo::Annotate {
                            subject_id,
                            restore: Some(
                                previous.unwrap_or_else(|| Subscription::pending(subject_id)),
                            ),
                        }
                    }
                    None => Undo::Nothing,
                },
                SubjectView::Subscribed => match subjects.iter().position(|s| s.id == subject_id) {
                    Some(index) => Undo::Reinsert {
                        index,
                        subject: subjects.remove(index),
                    },
                    None => Undo::Nothing,
                },
            };
            (generation, undo)
        });

        let result = self.inner.service.unsubscribe(subject_id).await;
        self.settle(Action::Unsubscribe, subject_id, generation, undo, result)
    }

    /// Open a new action on `subject_id`. The entry as it stands is the
    /// confirmed state when nothing else is in flight.
    fn begin(&self, subject_id: i64, subjects: &[Subject]) -> u64 {
        let mut tracks = self.inner.tracks.borrow_mut();
        let track = tracks.entry(subject_id).or_default();
        if track.in_flight == 0 {
            track.confirmed = entry(subjects, subject_id);
        }
        track.in_flight += 1;
        track.latest += 1;
        track.latest
    }

    fn settle(
        &self,
        action: Action,
        subject_id: i64,
        generation: u64,
        undo: Undo,
        result: Result<(), ApiError>,
    ) -> MutationOutcome {
        let (is_latest, settled, confirmed) = {
            let mut tracks = self.inner.tracks.borrow_mut();
            let track = tracks.entry(subject_id).or_default();
            track.in_flight = track.in_flight.saturating_sub(1);
            if result.is_ok() && generation > track.confirmed_generation {
                track.confirmed_generation = generation;
                track.confirmed = action.confirm(track.confirmed.take(), self.inner.view);
            }
            (
                track.latest == generation,
                track.in_flight == 0,
                track.confirmed.clone(),
            )
        };

        if self.inner.ordering == MutationOrdering::Sequenced {
            return self.settle_sequenced(action, subject_id, result, is_latest, settled, confirmed);
        }

        let error = match result {
            Ok(()) => return MutationOutcome::Confirmed,
            Err(error) => error,
        };
        tracing::warn!(
            "Failed to {} subject {}: {} (reverting)",
            action,
            subject_id,
            error
        );
        if !matches!(undo, Undo::Nothing) {
            self.inner.subjects.update(|subjects| undo.apply(subjects));
        }
        MutationOutcome::RolledBack
    }

    /// The newest failure falls back to the last confirmed entry, as does the
    /// last action to settle. Older failures leave the newer guess alone.
    fn settle_sequenced(
        &self,
        action: Action,
        subject_id: i64,
        result: Result<(), ApiError>,
        is_latest: bool,
        settled: bool,
        confirmed: Option<(usize, Subject)>,
    ) -> MutationOutcome {
        let outcome = match result {
            Ok(()) => MutationOutcome::Confirmed,
            Err(error) if is_latest => {
                tracing::warn!(
                    "Failed to {} subject {}: {} (reverting)",
                    action,
                    subject_id,
                    error
                );
                MutationOutcome::RolledBack
            }
            Err(error) => {
                tracing::warn!(
                    "Failed to {} subject {}: {} (superseded, keeping newer state)",
                    action,
                    subject_id,
                    error
                );
                MutationOutcome::Superseded
            }
        };

        if outcome == MutationOutcome::RolledBack || settled {
            self.restore_confirmed(subject_id, confirmed);
        }
        outcome
    }

    fn restore_confirmed(&self, subject_id: i64, confirmed: Option<(usize, Subject)>) {
        let current = self.inner.subjects.get();
        let mut next = current.clone();
        let position = next.iter().position(|s| s.id == subject_id);
        match (confirmed, position) {
            (Some((_, subject)), Some(at)) => {
                next[at].subscription_by_user = subject.subscription_by_user;
            }
            (Some((index, subject)), None) => {
                let index = index.min(next.len());
                next.insert(index, subject);
            }
            (None, Some(at)) if self.inner.view == SubjectView::Subscribed => {
                next.remove(at);
            }
            (None, _) => {}
        }
        if next != current {
            self.inner.subjects.set(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use futures::channel::oneshot;

    /// How the fake answers one mutation.
    enum Reply {
        Now(Result<(), ApiError>),
        Later(oneshot::Receiver<Result<(), ApiError>>),
    }

    #[derive(Clone)]
    struct FakeService {
        subjects: Rc<RefCell<Result<Vec<Subject>, ApiError>>>,
        subscriptions: Rc<RefCell<Result<Vec<Subscription>, ApiError>>>,
        replies: Rc<RefCell<VecDeque<Reply>>>,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Default for Reply {
        fn default() -> Self {
            Reply::Now(Ok(()))
        }
    }

    impl FakeService {
        fn with_data(subjects: Vec<Subject>, subscriptions: Vec<Subscription>) -> Self {
            Self {
                subjects: Rc::new(RefCell::new(Ok(subjects))),
                subscriptions: Rc::new(RefCell::new(Ok(subscriptions))),
                replies: Rc::default(),
                calls: Rc::default(),
            }
        }

        fn reply(&self, reply: Reply) {
            self.replies.borrow_mut().push_back(reply);
        }

        fn gate(&self) -> oneshot::Sender<Result<(), ApiError>> {
            let (tx, rx) = oneshot::channel();
            self.reply(Reply::Later(rx));
            tx
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        async fn answer(&self, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            let reply = self.replies.borrow_mut().pop_front().unwrap_or_default();
            match reply {
                Reply::Now(result) => result,
                Reply::Later(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Transport("dropped".into()))),
            }
        }
    }

    impl SubscriptionService for FakeService {
        async fn user_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
            self.calls.borrow_mut().push("subscriptions".into());
            self.subscriptions.borrow().clone()
        }

        async fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
            self.calls.borrow_mut().push("subjects".into());
            self.subjects.borrow().clone()
        }

        async fn subscribe(&self, subject_id: i64) -> Result<(), ApiError> {
            self.answer(format!("subscribe {subject_id}")).await
        }

        async fn unsubscribe(&self, subject_id: i64) -> Result<(), ApiError> {
            self.answer(format!("unsubscribe {subject_id}")).await
        }
    }

    fn subject(id: i64) -> Subject {
        Subject::new(id, format!("Subject {id}"), "")
    }

    fn record(subject_id: i64) -> Subscription {
        Subscription {
            id: 100 + subject_id,
            subject_id,
            user_id: 7,
        }
    }

    fn refused() -> ApiError {
        ApiError::Forbidden("Unauthorized to subscribe to this subject".into())
    }

    async fn loaded(
        view: SubjectView,
        ordering: MutationOrdering,
        subjects: Vec<Subject>,
        subscriptions: Vec<Subscription>,
    ) -> (OptimisticSubscriptionController<FakeService>, FakeService) {
        let fake = FakeService::with_data(subjects, subscriptions);
        let controller = OptimisticSubscriptionController::with_ordering(fake.clone(), view, ordering);
        controller.load_subjects().await.unwrap();
        (controller, fake)
    }

    fn annotations(controller: &OptimisticSubscriptionController<FakeService>) -> Vec<(i64, Option<Subscription>)> {
        controller
            .subjects()
            .into_iter()
            .map(|s| (s.id, s.subscription_by_user))
            .collect()
    }

    #[test]
    fn test_annotate_full_view() {
        let joined = annotate(vec![subject(1), subject(2)], &[record(2)], SubjectView::All);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].subscription_by_user, None);
        assert_eq!(joined[1].subscription_by_user, Some(record(2)));
    }

    #[test]
    fn test_annotate_subscribed_view() {
        let joined = annotate(
            vec![subject(1), subject(2)],
            &[record(2)],
            SubjectView::Subscribed,
        );
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].id, 2);
        assert_eq!(joined[0].subscription_by_user, Some(record(2)));
    }

    #[test]
    fn test_annotate_keeps_source_order() {
        let joined = annotate(
            vec![subject(3), subject(1), subject(2)],
            &[record(1), record(3)],
            SubjectView::Subscribed,
        );
        let ids: Vec<i64> = joined.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_load_fetches_subscriptions_then_subjects() {
        let fake = FakeService::with_data(vec![subject(1), subject(2)], vec![record(2)]);
        let controller = OptimisticSubscriptionController::new(fake.clone(), SubjectView::All);
        let mut watch = controller.observe();

        controller.load_subjects().await.unwrap();

        assert_eq!(fake.calls(), vec!["subscriptions", "subjects"]);
        let emitted = watch.drain();
        assert_eq!(emitted.len(), 2, "empty initial value, then the joined list");
        assert!(emitted[0].is_empty());
        assert_eq!(emitted[1].len(), 2);
        assert_eq!(emitted[1][1].subscription_by_user, Some(record(2)));
    }

    #[tokio::test]
    async fn test_load_failure_emits_nothing() {
        let fake = FakeService::with_data(vec![subject(1)], vec![]);
        *fake.subjects.borrow_mut() = Err(ApiError::Unauthorized("expired".into()));
        let controller = OptimisticSubscriptionController::new(fake, SubjectView::All);
        let mut watch = controller.observe();
        watch.drain();

        let err = controller.load_subjects().await.unwrap_err();
        assert!(err.is_auth_failure());
        assert!(watch.drain().is_empty());
        assert!(controller.subjects().is_empty());
    }

    #[tokio::test]
    async fn test_load_subscriptions_failure_skips_subjects() {
        let fake = FakeService::with_data(vec![subject(1)], vec![]);
        *fake.subscriptions.borrow_mut() = Err(ApiError::Transport("offline".into()));
        let controller = OptimisticSubscriptionController::new(fake.clone(), SubjectView::All);

        assert!(controller.load_subjects().await.is_err());
        assert_eq!(fake.calls(), vec!["subscriptions"]);
    }

    #[tokio::test]
    async fn test_subscribe_shows_placeholder_before_response() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Unsequenced,
            vec![subject(1), subject(2)],
            vec![],
        )
        .await;
        let gate = fake.gate();

        let mut pending = Box::pin(controller.subscribe(1));
        assert!(futures::poll!(&mut pending).is_pending());
        assert_eq!(
            annotations(&controller),
            vec![(1, Some(Subscription::pending(1))), (2, None)]
        );

        gate.send(Ok(())).unwrap();
        assert_eq!(pending.await, MutationOutcome::Confirmed);
        assert_eq!(
            controller.subjects()[0].subscription_by_user,
            Some(Subscription::pending(1))
        );
    }

    #[tokio::test]
    async fn test_subscribe_failure_reverts_fully() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Unsequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        let mut watch = controller.observe();
        watch.drain();
        fake.reply(Reply::Now(Err(refused())));

        assert_eq!(controller.subscribe(1).await, MutationOutcome::RolledBack);

        let emitted = watch.drain();
        assert_eq!(emitted.len(), 2);
        assert_eq!(
            emitted[0][0].subscription_by_user,
            Some(Subscription {
                id: 0,
                subject_id: 1,
                user_id: 0
            })
        );
        assert_eq!(emitted[1][0].subscription_by_user, None);
        assert_eq!(controller.subjects()[0].subscription_by_user, None);
    }

    #[tokio::test]
    async fn test_unsubscribe_success_is_not_contradicted() {
        let (controller, _fake) = loaded(
            SubjectView::All,
            MutationOrdering::Unsequenced,
            vec![subject(1), subject(2)],
            vec![record(2)],
        )
        .await;
        let mut watch = controller.observe();
        watch.drain();

        assert_eq!(controller.unsubscribe(2).await, MutationOutcome::Confirmed);

        let emitted = watch.drain();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0][1].subscription_by_user, None);
    }

    #[tokio::test]
    async fn test_unsubscribe_failure_restores_record() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Unsequenced,
            vec![subject(1), subject(2)],
            vec![record(2)],
        )
        .await;
        fake.reply(Reply::Now(Err(ApiError::Transport("offline".into()))));

        assert_eq!(controller.unsubscribe(2).await, MutationOutcome::RolledBack);
        assert_eq!(annotations(&controller), vec![(1, None), (2, Some(record(2)))]);
    }

    #[tokio::test]
    async fn test_unsubscribe_failure_after_placeholder_restores_placeholder() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Unsequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        assert_eq!(controller.subscribe(1).await, MutationOutcome::Confirmed);
        fake.reply(Reply::Now(Err(refused())));

        assert_eq!(controller.unsubscribe(1).await, MutationOutcome::RolledBack);
        assert_eq!(annotations(&controller), vec![(1, Some(Subscription::pending(1)))]);
    }

    #[tokio::test]
    async fn test_profile_unsubscribe_removes_then_reinserts_in_place() {
        let (controller, fake) = loaded(
            SubjectView::Subscribed,
            MutationOrdering::Unsequenced,
            vec![subject(1), subject(2), subject(3)],
            vec![record(1), record(2), record(3)],
        )
        .await;
        let gate = fake.gate();

        let mut pending = Box::pin(controller.unsubscribe(2));
        assert!(futures::poll!(&mut pending).is_pending());
        let ids: Vec<i64> = controller.subjects().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);

        gate.send(Err(refused())).unwrap();
        assert_eq!(pending.await, MutationOutcome::RolledBack);
        assert_eq!(
            annotations(&controller),
            vec![(1, Some(record(1))), (2, Some(record(2))), (3, Some(record(3)))]
        );
    }

    #[tokio::test]
    async fn test_profile_unsubscribe_success_stays_removed() {
        let (controller, _fake) = loaded(
            SubjectView::Subscribed,
            MutationOrdering::Unsequenced,
            vec![subject(1), subject(2)],
            vec![record(1), record(2)],
        )
        .await;
        assert_eq!(controller.unsubscribe(1).await, MutationOutcome::Confirmed);
        let ids: Vec<i64> = controller.subjects().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_profile_subscribe_never_inserts() {
        let (controller, fake) = loaded(
            SubjectView::Subscribed,
            MutationOrdering::Unsequenced,
            vec![subject(1), subject(2)],
            vec![record(2)],
        )
        .await;
        let before = controller.subjects();

        assert_eq!(controller.subscribe(1).await, MutationOutcome::Confirmed);
        assert_eq!(controller.subjects(), before);
        assert_eq!(fake.calls().last().map(String::as_str), Some("subscribe 1"));

        fake.reply(Reply::Now(Err(refused())));
        assert_eq!(controller.subscribe(1).await, MutationOutcome::RolledBack);
        assert_eq!(controller.subjects(), before);
    }

    #[tokio::test]
    async fn test_unknown_subject_still_sends_request() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Unsequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        fake.reply(Reply::Now(Err(refused())));
        assert_eq!(controller.subscribe(9).await, MutationOutcome::RolledBack);
        assert_eq!(annotations(&controller), vec![(1, None)]);
        assert_eq!(fake.calls().last().map(String::as_str), Some("subscribe 9"));
    }

    #[tokio::test]
    async fn test_unsequenced_double_click_last_response_wins() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Unsequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        let first = fake.gate();
        let second = fake.gate();

        let mut a = Box::pin(controller.subscribe(1));
        let mut b = Box::pin(controller.subscribe(1));
        assert!(futures::poll!(&mut a).is_pending());
        assert!(futures::poll!(&mut b).is_pending());

        // Second request succeeds first, the first one then fails.
        second.send(Ok(())).unwrap();
        assert_eq!(b.await, MutationOutcome::Confirmed);
        first.send(Err(refused())).unwrap();
        assert_eq!(a.await, MutationOutcome::RolledBack);

        // The late failure wins even though the server holds a subscription.
        assert_eq!(annotations(&controller), vec![(1, None)]);
    }

    #[tokio::test]
    async fn test_sequenced_double_click_keeps_newer_state() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Sequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        let first = fake.gate();
        let second = fake.gate();

        let mut a = Box::pin(controller.subscribe(1));
        let mut b = Box::pin(controller.subscribe(1));
        assert!(futures::poll!(&mut a).is_pending());
        assert!(futures::poll!(&mut b).is_pending());

        second.send(Ok(())).unwrap();
        assert_eq!(b.await, MutationOutcome::Confirmed);
        first.send(Err(refused())).unwrap();
        assert_eq!(a.await, MutationOutcome::Superseded);

        assert_eq!(annotations(&controller), vec![(1, Some(Subscription::pending(1)))]);
    }

    #[tokio::test]
    async fn test_sequenced_stale_subscribe_failure_after_unsubscribe() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Sequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        let subscribe_gate = fake.gate();

        let mut subscribing = Box::pin(controller.subscribe(1));
        assert!(futures::poll!(&mut subscribing).is_pending());
        assert_eq!(controller.unsubscribe(1).await, MutationOutcome::Confirmed);

        subscribe_gate.send(Err(refused())).unwrap();
        assert_eq!(subscribing.await, MutationOutcome::Superseded);
        assert_eq!(annotations(&controller), vec![(1, None)]);
    }

    #[tokio::test]
    async fn test_sequenced_only_tracks_same_subject() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Sequenced,
            vec![subject(1), subject(2)],
            vec![],
        )
        .await;
        let gate = fake.gate();

        let mut first = Box::pin(controller.subscribe(1));
        assert!(futures::poll!(&mut first).is_pending());
        assert_eq!(controller.subscribe(2).await, MutationOutcome::Confirmed);

        gate.send(Err(refused())).unwrap();
        assert_eq!(first.await, MutationOutcome::RolledBack);
        assert_eq!(
            annotations(&controller),
            vec![(1, None), (2, Some(Subscription::pending(2)))]
        );
    }

    async fn subscribe_then_unsubscribe_both_failing(newest_fails_first: bool) {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Sequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        let subscribe_gate = fake.gate();
        let unsubscribe_gate = fake.gate();

        let mut subscribing = Box::pin(controller.subscribe(1));
        assert!(futures::poll!(&mut subscribing).is_pending());
        let mut unsubscribing = Box::pin(controller.unsubscribe(1));
        assert!(futures::poll!(&mut unsubscribing).is_pending());

        if newest_fails_first {
            unsubscribe_gate.send(Err(refused())).unwrap();
            assert_eq!(unsubscribing.await, MutationOutcome::RolledBack);
            // Back to what the server holds, not to the pending guess.
            assert_eq!(annotations(&controller), vec![(1, None)]);
            subscribe_gate.send(Err(refused())).unwrap();
            assert_eq!(subscribing.await, MutationOutcome::Superseded);
        } else {
            subscribe_gate.send(Err(refused())).unwrap();
            assert_eq!(subscribing.await, MutationOutcome::Superseded);
            unsubscribe_gate.send(Err(refused())).unwrap();
            assert_eq!(unsubscribing.await, MutationOutcome::RolledBack);
        }

        assert_eq!(annotations(&controller), vec![(1, None)]);
    }

    #[tokio::test]
    async fn test_sequenced_both_fail_newest_first_leaves_no_placeholder() {
        subscribe_then_unsubscribe_both_failing(true).await;
    }

    #[tokio::test]
    async fn test_sequenced_both_fail_oldest_first_leaves_no_placeholder() {
        subscribe_then_unsubscribe_both_failing(false).await;
    }

    #[tokio::test]
    async fn test_sequenced_late_confirmation_wins_after_newer_failure() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Sequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        let subscribe_gate = fake.gate();
        let unsubscribe_gate = fake.gate();

        let mut subscribing = Box::pin(controller.subscribe(1));
        assert!(futures::poll!(&mut subscribing).is_pending());
        let mut unsubscribing = Box::pin(controller.unsubscribe(1));
        assert!(futures::poll!(&mut unsubscribing).is_pending());

        unsubscribe_gate.send(Err(refused())).unwrap();
        assert_eq!(unsubscribing.await, MutationOutcome::RolledBack);
        subscribe_gate.send(Ok(())).unwrap();
        assert_eq!(subscribing.await, MutationOutcome::Confirmed);

        // The server accepted the subscription.
        assert_eq!(annotations(&controller), vec![(1, Some(Subscription::pending(1)))]);
    }

    #[tokio::test]
    async fn test_sequenced_unsubscribe_after_confirmed_subscribe_restores_it() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Sequenced,
            vec![subject(1)],
            vec![record(1)],
        )
        .await;
        assert_eq!(controller.unsubscribe(1).await, MutationOutcome::Confirmed);
        assert_eq!(controller.subscribe(1).await, MutationOutcome::Confirmed);
        fake.reply(Reply::Now(Err(refused())));

        assert_eq!(controller.unsubscribe(1).await, MutationOutcome::RolledBack);
        assert_eq!(annotations(&controller), vec![(1, Some(Subscription::pending(1)))]);
    }

    #[tokio::test]
    async fn test_sequenced_profile_double_unsubscribe_both_fail() {
        let (controller, fake) = loaded(
            SubjectView::Subscribed,
            MutationOrdering::Sequenced,
            vec![subject(1), subject(2), subject(3)],
            vec![record(1), record(2), record(3)],
        )
        .await;
        let first = fake.gate();
        let second = fake.gate();

        let mut a = Box::pin(controller.unsubscribe(2));
        assert!(futures::poll!(&mut a).is_pending());
        let mut b = Box::pin(controller.unsubscribe(2));
        assert!(futures::poll!(&mut b).is_pending());

        second.send(Err(refused())).unwrap();
        assert_eq!(b.await, MutationOutcome::RolledBack);
        first.send(Err(refused())).unwrap();
        assert_eq!(a.await, MutationOutcome::Superseded);

        assert_eq!(
            annotations(&controller),
            vec![(1, Some(record(1))), (2, Some(record(2))), (3, Some(record(3)))]
        );
    }

    #[tokio::test]
    async fn test_reload_replaces_placeholder() {
        let (controller, fake) = loaded(
            SubjectView::All,
            MutationOrdering::Unsequenced,
            vec![subject(1)],
            vec![],
        )
        .await;
        controller.subscribe(1).await;
        *fake.subscriptions.borrow_mut() = Ok(vec![record(1)]);

        controller.load_subjects().await.unwrap();
        assert_eq!(annotations(&controller), vec![(1, Some(record(1)))]);
    }
}
