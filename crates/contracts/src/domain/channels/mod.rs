//! Sales channel domain module (`chnnl_mstr` collection).

pub mod record;

pub use record::{Channel, ChannelDraft, ChannelListQuery, CHANNEL_STATUS_ACTIVE};
