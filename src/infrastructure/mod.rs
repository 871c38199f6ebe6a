pub mod feed;
pub mod messaging;

#[cfg(test)]
pub(crate) mod test_support;
