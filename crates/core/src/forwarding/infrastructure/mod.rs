pub mod http_batch_transport;
pub mod threaded_result_forwarder;
