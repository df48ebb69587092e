// fleet-core/src/controller/handlers/search_handler.rs
// Live search editing, debounced refiltering and saved-query clearing

use crate::controller::actions::Command;
use crate::model::{app_state::Model, view_stack::ViewId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::*;

impl Model {
    /// Opens the search prompt for the current view, seeded with `seed` or
    /// the view's saved query.
    pub fn begin_search(&mut self, seed: Option<&str>) -> Command {
        let view = self.current_view();
        if !view.is_data_view() {
            return Command::None;
        }
        let seed = seed.map_or_else(|| self.search.saved(view).to_string(), str::to_string);
        debug!(
            marker = "SEARCH_BEGIN",
            operation_type = "search",
            view = ?view,
            "SearchHandler: editing query for {:?}",
            view
        );
        self.search.begin(view, seed);
        Command::None
    }

    /// Consumes keys while the prompt is open. `None` means the key was not
    /// for the prompt and should reach the navigator.
    pub(crate) fn handle_search_key(&mut self, key_event: KeyEvent) -> Option<Command> {
        let view = self.search.editing_view()?;
        trace!("SearchHandler: key {:?} while editing {:?}", key_event, view);

        match key_event.code {
            KeyCode::Esc => {
                self.search.cancel();
                self.refilter(view);
                debug!("SearchHandler: cancelled search for {:?}", view);
                Some(Command::None)
            }
            KeyCode::Enter => {
                self.search.commit();
                self.cursor = 0;
                self.refilter(view);
                debug!(
                    marker = "SEARCH_COMMIT",
                    operation_type = "search",
                    view = ?view,
                    query = self.search.saved(view),
                    "SearchHandler: committed query"
                );
                Some(Command::None)
            }
            KeyCode::Backspace => {
                if self.search.buffer().is_some_and(str::is_empty) {
                    return Some(Command::None);
                }
                Some(self.edit_search(view, |buffer| {
                    buffer.pop();
                }))
            }
            KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(self.edit_search(view, String::clear))
            }
            _ => {
                let c = typed_char(&key_event)?;
                Some(self.edit_search(view, |buffer| buffer.push(c)))
            }
        }
    }

    fn edit_search(&mut self, view: ViewId, edit: impl FnOnce(&mut String)) -> Command {
        let Some(generation) = self.search.edit(edit) else {
            return Command::None;
        };
        self.cursor = 0;
        Command::ScheduleSearchDebounce {
            view,
            generation,
            delay: self.settings.debounce,
        }
    }

    /// Applies the live buffer once typing has paused.
    pub(crate) fn on_search_debounce(&mut self, view: ViewId, generation: u64) -> Command {
        if generation != self.search.generation() || self.search.editing_view() != Some(view) {
            trace!(
                "SearchHandler: stale debounce fire for {:?} (gen {})",
                view, generation
            );
            return Command::None;
        }
        self.refilter(view);
        if view == self.current_view() {
            self.cursor = 0;
        }
        Command::None
    }

    /// Drops the saved query of `view` and shows its raw data again.
    pub fn clear_search(&mut self, view: ViewId) -> bool {
        if self.search.editing_view() == Some(view) {
            self.search.cancel();
        }
        let cleared = self.search.clear_saved(view);
        self.refilter(view);
        cleared
    }
}

#[cfg(test)]
mod tests {
    use crate::cloud::shell::ShellHandoff;
    use crate::controller::actions::{Command, Message};
    use crate::model::app_state::{CloudContext, Model, Settings};
    use crate::model::resources::Cluster;
    use crate::model::view_stack::ViewId;
    use crate::search::query::Query;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn clusters_model() -> Model {
        let mut m = Model::new(
            CloudContext::default(),
            Settings::default(),
            ShellHandoff::default(),
        );
        m.push_view(ViewId::Clusters);
        let records = ["prod-a", "prod-b", "staging"]
            .iter()
            .map(|name| Cluster {
                name: (*name).to_string(),
                status: "ACTIVE".into(),
                version: "1.30".into(),
                arn: format!("arn-{name}"),
            })
            .collect();
        m.datasets.clusters.replace(records, &Query::default());
        m
    }

    fn press(m: &mut Model, code: KeyCode) -> Command {
        m.update(Message::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(m: &mut Model, text: &str) -> Vec<Command> {
        text.chars().map(|c| press(m, KeyCode::Char(c))).collect()
    }

    #[test]
    fn test_typing_schedules_debounce_with_latest_generation() {
        let mut m = clusters_model();
        press(&mut m, KeyCode::Char('/'));
        let commands = type_str(&mut m, "prod");
        let Some(Command::ScheduleSearchDebounce { generation, .. }) = commands.last() else {
            panic!("expected debounce command");
        };
        assert_eq!(*generation, m.search.generation());
        // Nothing is filtered until the timer fires.
        assert_eq!(m.visible_len(), 3);

        m.update(Message::SearchDebounceFired {
            view: ViewId::Clusters,
            generation: *generation - 1,
        });
        assert_eq!(m.visible_len(), 3);

        m.update(Message::SearchDebounceFired {
            view: ViewId::Clusters,
            generation: *generation,
        });
        assert_eq!(m.visible_len(), 2);
    }

    #[test]
    fn test_enter_commits_and_esc_discards() {
        let mut m = clusters_model();
        press(&mut m, KeyCode::Char('/'));
        type_str(&mut m, "staging");
        press(&mut m, KeyCode::Enter);
        assert!(!m.search.is_editing());
        assert_eq!(m.search.saved(ViewId::Clusters), "staging");
        assert_eq!(m.visible_len(), 1);

        press(&mut m, KeyCode::Char('/'));
        assert_eq!(m.search.buffer(), Some("staging"));
        type_str(&mut m, "xyz");
        press(&mut m, KeyCode::Esc);
        assert_eq!(m.search.saved(ViewId::Clusters), "staging");
        assert_eq!(m.visible_len(), 1);
    }

    #[test]
    fn test_whitespace_query_is_unfiltered() {
        let mut m = clusters_model();
        press(&mut m, KeyCode::Char('/'));
        type_str(&mut m, "   ");
        press(&mut m, KeyCode::Enter);
        assert_eq!(m.search.saved(ViewId::Clusters), "");
        assert!(!m.datasets.clusters.is_filtered());
        assert_eq!(m.visible_len(), 3);
    }

    #[test]
    fn test_esc_outside_edit_clears_saved_query_first() {
        let mut m = clusters_model();
        m.search.set_saved(ViewId::Clusters, "prod");
        m.refilter(ViewId::Clusters);
        assert_eq!(m.visible_len(), 2);

        press(&mut m, KeyCode::Esc);
        assert_eq!(m.current_view(), ViewId::Clusters);
        assert_eq!(m.visible_len(), 3);

        press(&mut m, KeyCode::Esc);
        assert_eq!(m.current_view(), ViewId::Dashboard);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut m = clusters_model();
        m.search.set_saved(ViewId::Clusters, "prod");
        m.refilter(ViewId::Clusters);
        let first: Vec<String> = m
            .datasets
            .clusters
            .iter_visible()
            .map(|c| c.name.clone())
            .collect();
        m.refilter(ViewId::Clusters);
        let second: Vec<String> = m
            .datasets
            .clusters
            .iter_visible()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(first, second);
    }
}
