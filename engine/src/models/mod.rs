// Engine-side data models. Document value objects live in the `shared` crate.
pub mod customer;

pub use customer::CustomerRecord;
