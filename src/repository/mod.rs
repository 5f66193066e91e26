pub mod orders;
pub mod products;
pub mod settings;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use settings::ConfigStore;
