mod common;

mod test_state_machine;
