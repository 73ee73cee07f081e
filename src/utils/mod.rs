pub mod http_client;
pub mod response_normalizer;
pub mod text_excerpt;
