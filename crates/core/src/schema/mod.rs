//! Canonical record shapes for each studio resource, matching backend JSON.

pub mod album;
pub mod booking;
pub mod datetime;
pub mod feedback;
pub mod package;
pub mod portfolio;
pub mod staff;

pub use album::{Album, AlbumDraft, AlbumFilter};
pub use booking::{Booking, BookingConfig, BookingDraft, BookingFilter, BookingStatus, PaymentStatus};
pub use feedback::{Feedback, FeedbackDraft, FeedbackFilter, Reply};
pub use package::{Package, PackageDraft};
pub use portfolio::{Portfolio, PortfolioDraft, PortfolioFilter};
pub use staff::{AvailabilityUpdate, Staff, StaffDraft, StaffFilter};
