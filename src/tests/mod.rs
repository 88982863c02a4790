mod mechanics;
#[cfg(feature = "parse")]
mod parse;
mod pool;
mod roll;
