//! The three generation strategies and the comparator that runs all of them
//! over the same snapshot. Each generator is a pure function of an
//! `EntitySnapshot` plus whatever persisted entries `repo` reports for the
//! conflict kernel; none of them mutate `repo`.

pub mod coloring;
pub mod comparator;
pub mod genetic;
pub mod greedy;
