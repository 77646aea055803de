pub mod recipient_repo;

pub use recipient_repo::RecipientRepo;
