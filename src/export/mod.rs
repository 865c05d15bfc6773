pub mod excel;

pub use excel::write_table;
