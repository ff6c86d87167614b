mod properties;
mod parsing;
