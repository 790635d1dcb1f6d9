// Purpose - conversions at the boundary with the output pipeline

pub mod volume;
