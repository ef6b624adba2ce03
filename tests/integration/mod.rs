//! Integration tests for filosign-pack

mod helpers;
mod test_pack;
