mod mat_mul;
mod property;
