//! Example and invocation synthesis.

pub mod curl;
pub mod example;

pub use curl::CurlSynthesizer;
pub use example::{
    default_value, default_value_of, example_from_response, media_example, sample_json,
    sample_value, value_to_string,
};
