mod mutect2;

pub use mutect2::Mutect2;
