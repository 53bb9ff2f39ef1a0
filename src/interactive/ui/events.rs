use crate::query::{SearchQuery, SortKey};

/// User intent, produced by input handling and folded into state by
/// [`InteractiveApp::handle_message`](crate::interactive::InteractiveApp).
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    // Search form
    QueryChanged(SearchQuery),
    SubmitSearch,
    SortBy(SortKey),

    // Result list
    SelectUp,
    SelectDown,

    // Donation flow
    OpenDonate,
    CheckInputChanged(String),
    SubmitCheck,
    CloseDialog,
    DismissBanner,

    // Focus and overlays
    FocusForm,
    FocusResults,
    ShowHelp,
    CloseHelp,

    Quit,
}
