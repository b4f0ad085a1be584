//! Page controllers.
//!
//! Every page owns a [`Page`]: its cached data, one error slot and the
//! lifecycle below.
//!
//! ```text
//! Idle ──mount──▶ Loading ──fetch settles──▶ Ready ──create/delete──▶ Submitting
//!                    ▲                                                    │
//!                    └──────────────── success: full re-fetch ────────────┤
//!                                       failure: back to Ready, error set ┘
//! ```
//!
//! A successful mutation is never patched into the cache: the page re-fetches
//! its whole collection so server-computed fields (balances, spent amounts)
//! stay authoritative. The one exception is the inline category flow, which
//! appends the created category locally.
//!
//! Requests are not cancellable. Each one is issued with a [`Ticket`] and its
//! completion is applied only if the page is still mounted and the ticket is
//! still the latest one; anything else is dropped.

use api_types::{
    CategoryId, UserId,
    category::{Category, CategoryKind, CategoryNew},
};

use crate::error::ClientError;

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod transactions;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Submitting,
}

/// Identifies one asynchronous request issued by a [`Page`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct Page<D> {
    data: D,
    phase: Phase,
    error: Option<String>,
    user_id: Option<UserId>,
    mounted: bool,
    /// Bumped on every mount and unmount.
    epoch: u64,
    /// Bumped on every load or submission.
    seq: u64,
}

impl<D: Default> Page<D> {
    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Submissions are accepted only from `Ready`.
    pub fn can_submit(&self) -> bool {
        self.mounted && self.phase == Phase::Ready
    }

    /// Mounts the page for `user_id` and starts loading.
    ///
    /// Data loaded for a different user is dropped first.
    pub fn mount(&mut self, user_id: UserId) -> Ticket {
        if self.user_id != Some(user_id) {
            self.data = D::default();
            self.user_id = Some(user_id);
        }
        self.mounted = true;
        self.epoch += 1;
        self.error = None;
        self.begin_load()
    }

    /// Any completion still in flight becomes stale.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.epoch += 1;
        self.phase = Phase::Idle;
    }

    /// Follows the session: a different user reloads a mounted page, no user
    /// drops everything.
    pub fn sync_user(&mut self, user_id: Option<UserId>) -> Option<Ticket> {
        match user_id {
            Some(id) if self.mounted && self.user_id != Some(id) => Some(self.mount(id)),
            Some(_) => None,
            None => {
                self.unmount();
                self.user_id = None;
                self.data = D::default();
                self.error = None;
                None
            }
        }
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.seq += 1;
        self.phase = Phase::Loading;
        self.ticket()
    }

    /// Manual refresh, refused while a submission is running.
    pub fn begin_reload(&mut self) -> Option<(Ticket, UserId)> {
        let user_id = self.user_id.filter(|_| self.mounted)?;
        if self.phase == Phase::Submitting {
            return None;
        }
        self.error = None;
        Some((self.begin_load(), user_id))
    }

    /// Applies a fetch result. Returns `false` if the completion was stale.
    ///
    /// On failure the cached data is cleared and `fallback` becomes the error.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<D, ClientError>,
        fallback: &str,
    ) -> bool {
        if !self.accepts(ticket) {
            tracing::debug!("dropping stale load completion");
            return false;
        }
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("load failed: {err}");
                self.data = D::default();
                self.error = Some(fallback.to_string());
            }
        }
        self.phase = Phase::Ready;
        true
    }

    /// `Ready -> Submitting`. Returns `None` while a load or another
    /// submission is running.
    pub fn begin_submit(&mut self) -> Option<Ticket> {
        if !self.can_submit() {
            return None;
        }
        self.seq += 1;
        self.phase = Phase::Submitting;
        self.error = None;
        Some(self.ticket())
    }

    /// Applies a mutation result.
    ///
    /// On success the page moves to `Loading` and the returned ticket must be
    /// used for the re-fetch. On failure the data is left untouched.
    pub fn finish_submit<T>(
        &mut self,
        ticket: Ticket,
        result: Result<T, ClientError>,
        fallback: &str,
    ) -> Option<Ticket> {
        if !self.accepts(ticket) {
            tracing::debug!("dropping stale submit completion");
            return None;
        }
        match result {
            Ok(_) => Some(self.begin_load()),
            Err(err) => {
                tracing::warn!("submit failed: {err}");
                self.error = Some(err.user_message(fallback));
                self.phase = Phase::Ready;
                None
            }
        }
    }

    /// Records a local validation failure without changing phase.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            epoch: self.epoch,
            seq: self.seq,
        }
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.mounted && ticket == self.ticket()
    }

    /// Looser check for side flows that do not own the page phase.
    pub fn same_mount(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.epoch == self.epoch
    }
}

pub const CATEGORY_CREATE_ERROR: &str = "Failed to create category.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DraftField {
    #[default]
    Name,
    Kind,
}

/// Transient "new category" form opened from inside another form.
#[derive(Debug, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub kind: CategoryKind,
    pub focus: DraftField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl CategoryDraft {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            DraftField::Name => DraftField::Kind,
            DraftField::Kind => DraftField::Name,
        };
    }
}

/// The inline category sub-flow shared by the budget and transaction forms.
#[derive(Debug, Default)]
pub struct InlineCategory {
    draft: Option<CategoryDraft>,
}

impl InlineCategory {
    pub fn open(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(CategoryDraft::default());
        }
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&CategoryDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut CategoryDraft> {
        self.draft.as_mut()
    }

    /// Starts the create call for the open draft.
    pub fn begin<D: Default>(&mut self, page: &Page<D>) -> Option<(Ticket, CategoryNew)> {
        let user_id = page.user_id().filter(|_| page.is_mounted())?;
        let draft = self.draft.as_mut()?;
        if draft.submitting {
            return None;
        }
        let name = draft.name.trim();
        if name.is_empty() {
            draft.error = Some("Name is required.".to_string());
            return None;
        }
        let payload = CategoryNew {
            name: name.to_string(),
            kind: draft.kind,
            user_id,
        };
        draft.submitting = true;
        draft.error = None;
        Some((page.ticket(), payload))
    }

    /// Closes the draft on success and hands back the created category.
    ///
    /// `accepted` is false when the host page went away meanwhile; the result
    /// is then dropped.
    pub fn finish(
        &mut self,
        accepted: bool,
        result: Result<Category, ClientError>,
    ) -> Option<Category> {
        if !accepted {
            tracing::debug!("dropping stale inline category completion");
            return None;
        }
        match result {
            Ok(category) => {
                self.draft = None;
                Some(category)
            }
            Err(err) => {
                tracing::warn!("inline category creation failed: {err}");
                if let Some(draft) = self.draft.as_mut() {
                    draft.submitting = false;
                    draft.error = Some(err.user_message(CATEGORY_CREATE_ERROR));
                }
                None
            }
        }
    }
}

/// Appends a category created inline and selects it.
pub(crate) fn adopt_category(
    categories: &mut Vec<Category>,
    selected: &mut Option<CategoryId>,
    created: Category,
) {
    *selected = Some(created.id);
    categories.push(created);
}

/// Steps through `ids` with `None` as the "nothing selected" slot before the
/// first entry.
pub fn cycle_id(ids: &[i64], current: Option<i64>, forward: bool) -> Option<i64> {
    if ids.is_empty() {
        return None;
    }
    let slots = ids.len() + 1;
    let position = current
        .and_then(|id| ids.iter().position(|candidate| *candidate == id))
        .map_or(0, |idx| idx + 1);
    let next = if forward {
        (position + 1) % slots
    } else {
        (position + slots - 1) % slots
    };
    next.checked_sub(1).map(|idx| ids[idx])
}

/// Moves a list cursor, clamped to `len`.
pub fn step(selected: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1).min(len - 1)
    }
}

/// Steps through a fixed list of choices, wrapping around.
pub fn cycle<T: Copy + PartialEq>(choices: &[T], current: T, forward: bool) -> T {
    let Some(position) = choices.iter().position(|choice| *choice == current) else {
        return current;
    };
    let len = choices.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    choices[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: CategoryId, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            kind: CategoryKind::Expense,
            description: None,
            user_id: 1,
            created_at: None,
        }
    }

    #[test]
    fn mount_load_ready() {
        let mut page: Page<Vec<u32>> = Page::default();
        assert_eq!(page.phase(), Phase::Idle);

        let ticket = page.mount(1);
        assert!(page.is_loading());
        assert!(page.finish_load(ticket, Ok(vec![1, 2]), "failed"));
        assert_eq!(page.phase(), Phase::Ready);
        assert_eq!(page.data(), &vec![1, 2]);
        assert!(page.error().is_none());
    }

    #[test]
    fn load_failure_clears_data_and_sets_fixed_error() {
        let mut page: Page<Vec<u32>> = Page::default();
        let ticket = page.mount(1);
        page.finish_load(ticket, Ok(vec![7]), "failed");

        let ticket = page.begin_load();
        let err = ClientError::from_status(500, Some("db down".to_string()));
        page.finish_load(ticket, Err(err), "Failed to load accounts.");
        assert!(page.data().is_empty());
        assert_eq!(page.error(), Some("Failed to load accounts."));
        assert_eq!(page.phase(), Phase::Ready);
    }

    #[test]
    fn completion_after_unmount_is_a_no_op() {
        let mut page: Page<Vec<u32>> = Page::default();
        let ticket = page.mount(1);
        page.unmount();

        assert!(!page.finish_load(ticket, Ok(vec![1]), "failed"));
        assert!(page.data().is_empty());
        assert_eq!(page.phase(), Phase::Idle);
    }

    #[test]
    fn superseded_load_is_dropped() {
        let mut page: Page<Vec<u32>> = Page::default();
        let first = page.mount(1);
        let second = page.begin_load();

        assert!(!page.finish_load(first, Ok(vec![1]), "failed"));
        assert!(page.is_loading());
        assert!(page.finish_load(second, Ok(vec![2]), "failed"));
        assert_eq!(page.data(), &vec![2]);
    }

    #[test]
    fn remount_after_user_switch_drops_old_data() {
        let mut page: Page<Vec<u32>> = Page::default();
        let ticket = page.mount(1);
        page.finish_load(ticket, Ok(vec![1]), "failed");

        let reload = page.sync_user(Some(2)).unwrap();
        assert!(page.data().is_empty());
        assert_eq!(page.user_id(), Some(2));
        assert!(page.finish_load(reload, Ok(vec![9]), "failed"));

        assert!(page.sync_user(Some(2)).is_none());
        page.sync_user(None);
        assert!(!page.is_mounted());
        assert!(page.data().is_empty());
    }

    #[test]
    fn submit_is_refused_unless_ready() {
        let mut page: Page<Vec<u32>> = Page::default();
        assert!(page.begin_submit().is_none());

        let ticket = page.mount(1);
        assert!(page.begin_submit().is_none(), "still loading");
        page.finish_load(ticket, Ok(vec![]), "failed");

        let submit = page.begin_submit().unwrap();
        assert!(page.begin_submit().is_none(), "control disabled while submitting");

        let reload = page.finish_submit(submit, Ok(()), "failed").unwrap();
        assert!(page.is_loading());
        assert!(page.finish_load(reload, Ok(vec![3]), "failed"));
    }

    #[test]
    fn failed_submit_keeps_data() {
        let mut page: Page<Vec<u32>> = Page::default();
        let ticket = page.mount(1);
        page.finish_load(ticket, Ok(vec![1, 2]), "failed");

        let submit = page.begin_submit().unwrap();
        let err = ClientError::from_status(422, None);
        assert!(page.finish_submit::<()>(submit, Err(err), "Failed to create account.").is_none());
        assert_eq!(page.data(), &vec![1, 2]);
        assert_eq!(page.error(), Some("Failed to create account."));
        assert_eq!(page.phase(), Phase::Ready);
    }

    #[test]
    fn submit_completion_after_unmount_is_dropped() {
        let mut page: Page<Vec<u32>> = Page::default();
        let ticket = page.mount(1);
        page.finish_load(ticket, Ok(vec![1]), "failed");
        let submit = page.begin_submit().unwrap();
        page.unmount();

        assert!(page.finish_submit(submit, Ok(()), "failed").is_none());
        assert_eq!(page.phase(), Phase::Idle);
        assert!(page.error().is_none());
    }

    #[test]
    fn inline_category_requires_a_name() {
        let mut page: Page<()> = Page::default();
        page.mount(1);
        let mut inline = InlineCategory::default();
        assert!(inline.begin(&page).is_none(), "closed draft");

        inline.open();
        assert!(inline.begin(&page).is_none());
        assert!(inline.draft().unwrap().error.is_some());
    }

    #[test]
    fn inline_category_failure_keeps_draft_open() {
        let mut page: Page<()> = Page::default();
        page.mount(1);
        let mut inline = InlineCategory::default();
        inline.open();
        inline.draft_mut().unwrap().name = "Rent".to_string();

        let (ticket, payload) = inline.begin(&page).unwrap();
        assert_eq!(payload.kind, CategoryKind::Expense);
        let created = inline.finish(page.same_mount(ticket), Err(ClientError::from_status(500, None)));
        assert!(created.is_none());
        let draft = inline.draft().unwrap();
        assert_eq!(draft.error.as_deref(), Some(CATEGORY_CREATE_ERROR));
        assert!(!draft.submitting);
    }

    #[test]
    fn adopt_appends_and_selects() {
        let mut categories = vec![category(1, "Rent")];
        let mut selected = None;
        adopt_category(&mut categories, &mut selected, category(9, "Groceries"));
        assert_eq!(selected, Some(9));
        assert_eq!(categories.last().map(|c| c.id), Some(9));
    }

    #[test]
    fn cycle_id_wraps_through_empty_slot() {
        let ids = [10, 20];
        assert_eq!(cycle_id(&ids, None, true), Some(10));
        assert_eq!(cycle_id(&ids, Some(10), true), Some(20));
        assert_eq!(cycle_id(&ids, Some(20), true), None);
        assert_eq!(cycle_id(&ids, None, false), Some(20));
        assert_eq!(cycle_id(&[], Some(3), true), None);
    }
}
