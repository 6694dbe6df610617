pub mod batch_transport;
pub mod result_forwarder;
