pub mod payment;
pub mod relay;

pub use payment::{Country, ForwardData, ForwardReply, PaymentData, PaymentResponse};
pub use relay::{Relay, RelayFlag, RelaySet};
