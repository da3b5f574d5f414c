mod round_repository;

pub use round_repository::RoundRepository;
