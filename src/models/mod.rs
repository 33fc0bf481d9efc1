mod food;
mod serving_size;

pub use food::{Food, FoodDraft, ValidationErrors};
#[allow(unused_imports)]
pub use serving_size::{ParseServingSizeError, ServingSize};
