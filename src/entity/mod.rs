pub mod additional_services;
pub mod booked_outfit;
pub mod event_feedbacks;
pub mod event_type;
pub mod events;
pub mod gown_package;
pub mod gown_package_outfits;
pub mod outfits;
pub mod supplier_availability;
pub mod supplier_social_media;
pub mod suppliers;
pub mod users;
pub mod venues;

pub use additional_services::Entity as AdditionalServices;
pub use booked_outfit::Entity as BookedOutfits;
pub use event_feedbacks::Entity as EventFeedbacks;
pub use event_type::Entity as EventTypes;
pub use events::Entity as Events;
pub use gown_package::Entity as GownPackages;
pub use gown_package_outfits::Entity as GownPackageOutfits;
pub use outfits::Entity as Outfits;
pub use supplier_availability::Entity as SupplierAvailability;
pub use supplier_social_media::Entity as SupplierSocialMedia;
pub use suppliers::Entity as Suppliers;
pub use users::Entity as Users;
pub use venues::Entity as Venues;
