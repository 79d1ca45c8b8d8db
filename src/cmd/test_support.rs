pub(crate) use wrapreg_testkit::{compressed_fixture, fixture_arg, run_wrapreg, run_wrapreg_json};
