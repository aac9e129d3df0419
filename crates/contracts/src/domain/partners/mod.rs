//! Partner domain module
//!
//! Partners are Record Store users (`directus_users`): `first_name` holds
//! the company name and `last_name` the team-leader name. The free-text
//! active region lives in the companion `usr_dtl` collection and is merged
//! into the listing by the partner service.

pub mod record;

pub use record::{Partner, PartnerDraft, PartnerListQuery, PartnerRole, UserDetail};
