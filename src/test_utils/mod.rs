#![allow(missing_docs)]

pub(crate) mod dataset;
pub(crate) mod http;

pub(crate) use dataset::{
    CountingDataset, StaticDataset, create_test_transaction, shirt_and_mug_dataset,
};
pub(crate) use http::{assert_content_type, parse_json_body};
