pub mod signal_handling;
