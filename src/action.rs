/// Every user-driven state change goes through one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Lifecycle
    Quit,
    Tick,
    Resize,

    // Scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,

    // File navigation
    NextFile,
    PrevFile,

    // Context lines
    IncreaseContext,
    DecreaseContext,
    ResetContext,
    AllContext,
}
