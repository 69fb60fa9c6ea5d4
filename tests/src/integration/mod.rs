//! Cross-crate flows: typed API → caller → broker → transport → host → dispatcher.

mod api_flows;
mod broker_flows;
