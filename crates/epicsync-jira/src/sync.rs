//! Sequential epic-then-stories synchronization.
//!
//! For each epic: create it; if that succeeded, create each of its stories
//! linked to the new epic key. A failed epic skips all of its stories. A
//! failed story does not affect its siblings.

use epicsync_core::model::{Epic, UserStory};

use crate::client::JiraClient;
use crate::error::JiraError;
use crate::transport::Transport;

/// Receives progress notifications during [`sync_epics`].
///
/// All methods default to doing nothing.
pub trait SyncObserver {
    fn epic_started(&mut self, _epic: &Epic) {}
    fn epic_created(&mut self, _epic: &Epic, _key: &str) {}
    fn epic_failed(&mut self, _epic: &Epic, _error: &JiraError) {}
    fn story_created(&mut self, _story: &UserStory, _key: &str) {}
    fn story_failed(&mut self, _story: &UserStory, _error: &JiraError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}

/// Counts of what happened during a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub epics_created: usize,
    pub epics_failed: usize,
    pub stories_created: usize,
    pub stories_failed: usize,
    /// Stories never attempted because their epic failed.
    pub stories_skipped: usize,
}

impl SyncSummary {
    pub fn total_created(&self) -> usize {
        self.epics_created + self.stories_created
    }

    pub fn has_failures(&self) -> bool {
        self.epics_failed > 0 || self.stories_failed > 0
    }
}

/// Creates every epic and its stories, in order.
///
/// Keys are written back onto the records; the client's log collects the
/// successful creations.
pub fn sync_epics<T: Transport>(
    client: &mut JiraClient<T>,
    epics: &mut [Epic],
    observer: &mut dyn SyncObserver,
) -> SyncSummary {
    let mut summary = SyncSummary::default();

    for epic in epics.iter_mut() {
        observer.epic_started(epic);

        let epic_key = match client.create_epic(epic) {
            Ok(key) => {
                summary.epics_created += 1;
                observer.epic_created(epic, &key);
                key
            }
            Err(e) => {
                summary.epics_failed += 1;
                summary.stories_skipped += epic.user_stories.len();
                observer.epic_failed(epic, &e);
                continue;
            }
        };

        for story in epic.user_stories.iter_mut() {
            match client.create_story(story, &epic_key) {
                Ok(key) => {
                    summary.stories_created += 1;
                    observer.story_created(story, &key);
                }
                Err(e) => {
                    summary.stories_failed += 1;
                    observer.story_failed(story, &e);
                }
            }
        }
    }

    summary
}
