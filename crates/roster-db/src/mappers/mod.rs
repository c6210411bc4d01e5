//! Entity <-> model mappers

mod member;
