mod flags;
mod user_ref;

pub use flags::YnFlag;
pub use user_ref::UserRef;

/// Named collection in the Record Store.
pub trait Collection {
    /// Collection name as registered in the Record Store.
    const NAME: &'static str;
}
