use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        events::{AdditionalItem, CreateEventRequest, EventCreated},
        feedback::{FeedbackCreated, SubmitFeedbackRequest},
        outfits::{BookOutfitRequest, CreateOutfitRequest},
        packages::{
            PackageAdditionalService, PackageDetails, PackageGownPackage, PackageSummary,
            PackageSupplier, PackageVenue,
        },
        suppliers::{AvailabilityQuery, SetAvailabilityRequest, SupplierEvent, SupplierEventOutfit},
        users::{ChangePasswordRequest, UpdateProfileRequest},
        wishlist::{
            CreateWishlistPackageRequest, Inclusion, OutfitSelection, ServiceSelection,
            SupplierSelection, VenueSelection, WishlistAdditionalService, WishlistEntry,
            WishlistEvent, WishlistGownPackage, WishlistOutfit, WishlistPackage,
            WishlistPackageCreated, WishlistSupplier, WishlistVenue,
        },
    },
    models::{
        AdditionalService, Availability, BookedOutfit, BookedSchedule, Event, EventType,
        EventsByMonth, Feedback, GownPackage, Outfit, SocialMedia, Supplier, UserProfile, Venue,
    },
    response::{ApiResponse, ResponseStatus},
    routes::{auth, catalog, events, feedback, health, packages, suppliers, users, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::check_auth,
        auth::logout,
        users::my_profile,
        users::user_profile,
        users::update_profile,
        users::change_password,
        catalog::create_outfit,
        catalog::list_outfits,
        catalog::get_outfit,
        catalog::book_outfit,
        catalog::booked_outfits,
        catalog::available_suppliers,
        catalog::suppliers,
        catalog::available_venues,
        catalog::available_gown_packages,
        catalog::created_services,
        catalog::gown_package_outfits,
        catalog::event_types,
        events::create_event,
        events::upcoming_events,
        events::events_by_month,
        events::event_wishlist,
        events::booked_wishlist,
        events::delete_event,
        events::schedules,
        wishlist::wishlist,
        wishlist::create_wishlist_package,
        packages::created_packages,
        packages::package_details,
        suppliers::supplier_events,
        suppliers::list_availability,
        suppliers::set_availability,
        suppliers::delete_availability,
        feedback::submit_feedback,
        feedback::event_feedback
    ),
    components(
        schemas(
            ResponseStatus,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            UserProfile,
            UpdateProfileRequest,
            ChangePasswordRequest,
            Outfit,
            CreateOutfitRequest,
            BookOutfitRequest,
            BookedOutfit,
            Venue,
            GownPackage,
            AdditionalService,
            EventType,
            SocialMedia,
            Supplier,
            Event,
            CreateEventRequest,
            AdditionalItem,
            EventCreated,
            BookedSchedule,
            EventsByMonth,
            Inclusion,
            VenueSelection,
            OutfitSelection,
            ServiceSelection,
            SupplierSelection,
            CreateWishlistPackageRequest,
            WishlistPackageCreated,
            WishlistEntry,
            WishlistEvent,
            WishlistPackage,
            WishlistVenue,
            WishlistGownPackage,
            WishlistOutfit,
            WishlistSupplier,
            WishlistAdditionalService,
            PackageSummary,
            PackageVenue,
            PackageGownPackage,
            PackageSupplier,
            PackageAdditionalService,
            PackageDetails,
            SupplierEvent,
            SupplierEventOutfit,
            AvailabilityQuery,
            SetAvailabilityRequest,
            Availability,
            SubmitFeedbackRequest,
            FeedbackCreated,
            Feedback,
            ApiResponse<UserProfile>,
            ApiResponse<Vec<Supplier>>,
            ApiResponse<EventCreated>,
            ApiResponse<WishlistPackageCreated>,
            ApiResponse<Vec<SupplierEvent>>,
            ApiResponse<Vec<Availability>>,
            ApiResponse<Vec<Feedback>>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and token checks"),
        (name = "Users", description = "Profile endpoints"),
        (name = "Catalog", description = "Outfits, venues, gown packages, suppliers and services"),
        (name = "Events", description = "Event booking endpoints"),
        (name = "Wishlist", description = "Wishlist package assembly"),
        (name = "Packages", description = "Catalog event packages"),
        (name = "Suppliers", description = "Supplier events and availability"),
        (name = "Feedback", description = "Event feedback"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/register",
            "/wishlist-packages",
            "/packages/{id}",
            "/api/supplier/availability/{date}",
            "/event-feedback/{events_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemes = doc.components.expect("components").security_schemes;
        assert!(schemes.contains_key("bearer_auth"));
    }
}
