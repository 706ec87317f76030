pub mod request_reader;
pub mod step_writer;
