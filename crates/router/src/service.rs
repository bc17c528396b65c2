use std::fmt;

use history::{HistoryEnv, NavigationEvent};
use tracing::{debug, info, info_span};

use crate::action::{cleaned_url, detect_action, ActionKind, SelectionMode, UrlAction};

type OpenHandler = Box<dyn FnMut(&UrlAction)>;
type ShareHandler = Box<dyn FnMut(Option<SelectionMode>, &UrlAction)>;

/// Watches the location for trigger tokens and fires callbacks once per
/// occurrence.
///
/// On a hit the URL is cleaned with a history replacement *before* the
/// callback runs, so a reload or a re-entrant check never fires it again.
#[derive(Default)]
pub struct ActionRouter {
    on_open: Option<OpenHandler>,
    on_share: Option<ShareHandler>,
    fired: usize,
}

impl ActionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&UrlAction) + 'static,
    {
        self.on_open = Some(Box::new(handler));
        self
    }

    pub fn on_share<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Option<SelectionMode>, &UrlAction) + 'static,
    {
        self.on_share = Some(Box::new(handler));
        self
    }

    /// Number of actions dispatched so far.
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Initial check at page load.
    pub fn init<E: HistoryEnv + ?Sized>(&mut self, env: &mut E) -> Option<UrlAction> {
        self.check(env, "init")
    }

    /// Re-check after back/forward or a fragment change.
    pub fn on_navigation<E: HistoryEnv + ?Sized>(
        &mut self,
        env: &mut E,
        event: NavigationEvent,
    ) -> Option<UrlAction> {
        let trigger = match event {
            NavigationEvent::PopState => "popstate",
            NavigationEvent::HashChange => "hashchange",
        };
        self.check(env, trigger)
    }

    fn check<E: HistoryEnv + ?Sized>(&mut self, env: &mut E, trigger: &str) -> Option<UrlAction> {
        let span = info_span!("route_url", trigger);
        let _guard = span.enter();

        let Some(location) = env.location() else {
            debug!("route_skipped_no_location");
            return None;
        };
        let action = detect_action(&location)?;

        env.replace(&cleaned_url(&location, &action));
        info!(token = action.token, part = ?action.part, "url_action_detected");

        match action.kind {
            ActionKind::OpenModal => match self.on_open.as_mut() {
                Some(handler) => handler(&action),
                None => debug!(token = action.token, "url_action_unhandled"),
            },
            ActionKind::StartShare { mode } => match self.on_share.as_mut() {
                Some(handler) => handler(mode, &action),
                None => debug!(token = action.token, "url_action_unhandled"),
            },
        }
        self.fired += 1;
        Some(action)
    }
}

impl fmt::Debug for ActionRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRouter")
            .field("on_open", &self.on_open.is_some())
            .field("on_share", &self.on_share.is_some())
            .field("fired", &self.fired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use history::query::UrlPart;
    use history::{Detached, MemoryHistory};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Open,
        Share(Option<SelectionMode>),
    }

    fn recording_router() -> (ActionRouter, Rc<RefCell<Vec<Seen>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let open_log = Rc::clone(&log);
        let share_log = Rc::clone(&log);
        let router = ActionRouter::new()
            .on_open(move |_| open_log.borrow_mut().push(Seen::Open))
            .on_share(move |mode, _| share_log.borrow_mut().push(Seen::Share(mode)));
        (router, log)
    }

    #[test]
    fn init_dispatches_and_cleans() {
        let (mut router, log) = recording_router();
        let mut env = MemoryHistory::parse("https://example.com/docs?lang=en&share-section").unwrap();

        let action = router.init(&mut env).unwrap();
        assert_eq!(action.part, UrlPart::Query);
        assert_eq!(*log.borrow(), vec![Seen::Share(Some(SelectionMode::Section))]);
        assert_eq!(env.current().as_str(), "https://example.com/docs?lang=en");
        assert_eq!(env.len(), 1);
        assert_eq!(env.replacements(), 1);
    }

    #[test]
    fn reload_after_cleaning_does_not_refire() {
        let (mut router, log) = recording_router();
        let mut env = MemoryHistory::parse("https://example.com/#open-settings").unwrap();
        router.init(&mut env);
        assert_eq!(router.init(&mut env), None);
        assert_eq!(*log.borrow(), vec![Seen::Open]);
        assert_eq!(router.fired(), 1);
    }

    #[test]
    fn hash_change_is_routed() {
        let (mut router, log) = recording_router();
        let mut env = MemoryHistory::parse("https://example.com/docs").unwrap();
        assert_eq!(router.init(&mut env), None);

        let event = env.set_hash(Some("share")).unwrap();
        let action = router.on_navigation(&mut env, event).unwrap();
        assert_eq!(action.kind, ActionKind::StartShare { mode: None });
        assert_eq!(env.current().fragment(), None);
        assert_eq!(*log.borrow(), vec![Seen::Share(None)]);
    }

    #[test]
    fn pop_state_is_routed() {
        let (mut router, log) = recording_router();
        let mut env = MemoryHistory::parse("https://example.com/?open-settings").unwrap();
        env.navigate(history::parse_location("https://example.com/next").unwrap());

        let event = env.back().unwrap();
        router.on_navigation(&mut env, event);
        assert_eq!(*log.borrow(), vec![Seen::Open]);
        assert_eq!(env.current().as_str(), "https://example.com/");
    }

    struct JournalEnv {
        inner: MemoryHistory,
        journal: Rc<RefCell<Vec<String>>>,
    }

    impl HistoryEnv for JournalEnv {
        fn location(&self) -> Option<history::url::Url> {
            self.inner.location()
        }

        fn replace(&mut self, url: &history::url::Url) {
            self.journal.borrow_mut().push(format!("replace {url}"));
            self.inner.replace(url);
        }
    }

    #[test]
    fn url_is_cleaned_before_handler_runs() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let handler_journal = Rc::clone(&journal);
        let mut router = ActionRouter::new().on_share(move |mode, _| {
            handler_journal.borrow_mut().push(format!("share {mode:?}"));
        });
        let mut env = JournalEnv {
            inner: MemoryHistory::parse("https://example.com/?share-range&x=1").unwrap(),
            journal: Rc::clone(&journal),
        };

        router.init(&mut env);
        assert_eq!(
            *journal.borrow(),
            vec![
                "replace https://example.com/?x=1".to_string(),
                "share Some(Range)".to_string(),
            ]
        );
    }

    #[test]
    fn missing_handlers_still_clean() {
        let mut router = ActionRouter::new();
        let mut env = MemoryHistory::parse("https://example.com/?share").unwrap();
        assert!(router.init(&mut env).is_some());
        assert_eq!(env.current().as_str(), "https://example.com/");
    }

    #[test]
    fn detached_is_a_no_op() {
        let (mut router, log) = recording_router();
        assert_eq!(router.init(&mut Detached), None);
        assert_eq!(router.on_navigation(&mut Detached, NavigationEvent::HashChange), None);
        assert!(log.borrow().is_empty());
    }
}
