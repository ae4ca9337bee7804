pub(crate) use assert2::{assert, let_assert as assert_let};
