mod builder;
mod normalize;
mod proposal;
