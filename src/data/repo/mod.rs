pub mod shelters;
