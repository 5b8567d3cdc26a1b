pub mod test_metrics;
