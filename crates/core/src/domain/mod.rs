pub mod assessment;
pub mod conditions;
pub mod practice;
pub mod product;
pub mod regulation;
pub mod risk;
pub mod water;
