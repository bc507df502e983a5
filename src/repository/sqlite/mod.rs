mod analysis_repository;

pub use analysis_repository::AnalysisRepository;
