pub mod reading_fmt;
