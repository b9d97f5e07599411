mod category_repository;
mod post_repository;
mod preference_repository;
mod user_repository;

pub use category_repository::CategoryRepository;
pub use post_repository::PostRepository;
pub use preference_repository::PreferenceRepository;
pub use user_repository::UserRepository;
