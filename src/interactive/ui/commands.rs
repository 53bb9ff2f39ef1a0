use crate::query::SortKey;

/// Side effects the runtime performs after a state update, all of them calls
/// into the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    None,
    ExecuteSearch(Option<(SortKey, bool)>),
    RequestPayment,
    CheckTransaction(String),
}
