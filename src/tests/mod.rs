mod percentile;
mod properties;
