mod negative;
mod positive;
