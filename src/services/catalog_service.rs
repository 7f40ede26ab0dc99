use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::{
    dto::outfits::{BookOutfitRequest, CreateOutfitRequest},
    entity::{
        AdditionalServices, BookedOutfits, EventTypes, GownPackages, Outfits, SupplierSocialMedia,
        Suppliers, Users, Venues, additional_services, booked_outfit, event_type, gown_package,
        gown_package_outfits, outfits, supplier_social_media, suppliers, users, venues,
    },
    error::{AppError, AppResult},
    models::{
        AdditionalService, BookedOutfit, EventType, GownPackage, Outfit, SocialMedia, Supplier,
        Venue,
    },
};

const ACTIVE: &str = "Active";

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn create_outfit<C: ConnectionTrait>(
    db: &C,
    payload: CreateOutfitRequest,
) -> AppResult<Outfit> {
    let (
        Some(outfit_name),
        Some(outfit_type),
        Some(outfit_color),
        Some(outfit_desc),
        Some(rent_price),
        Some(status),
        Some(outfit_img),
    ) = (
        present(payload.outfit_name),
        present(payload.outfit_type),
        present(payload.outfit_color),
        present(payload.outfit_desc),
        payload.rent_price,
        present(payload.status),
        present(payload.outfit_img),
    )
    else {
        return Err(AppError::bad_request("All fields are required!"));
    };
    if rent_price.is_sign_negative() {
        return Err(AppError::bad_request("Rent price cannot be negative"));
    }

    let outfit = outfits::ActiveModel {
        outfit_id: NotSet,
        outfit_name: Set(outfit_name),
        outfit_type: Set(outfit_type),
        outfit_color: Set(outfit_color),
        outfit_desc: Set(outfit_desc),
        rent_price: Set(rent_price),
        status: Set(status),
        outfit_img: Set(Some(outfit_img)),
        size: Set(present(payload.size)),
        weight: Set(present(payload.weight)),
    }
    .insert(db)
    .await?;

    tracing::info!(outfit_id = outfit.outfit_id, "outfit created");
    Ok(outfit_from_entity(outfit))
}

pub async fn list_outfits<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Outfit>> {
    let items = Outfits::find()
        .order_by_asc(outfits::Column::OutfitId)
        .all(db)
        .await?
        .into_iter()
        .map(outfit_from_entity)
        .collect();
    Ok(items)
}

pub async fn get_outfit<C: ConnectionTrait>(db: &C, outfit_id: i32) -> AppResult<Outfit> {
    Outfits::find_by_id(outfit_id)
        .one(db)
        .await?
        .map(outfit_from_entity)
        .ok_or_else(|| AppError::not_found("Outfit not found"))
}

pub async fn book_outfit<C: ConnectionTrait>(
    db: &C,
    userid: i32,
    payload: BookOutfitRequest,
) -> AppResult<BookedOutfit> {
    let Some(outfit_id) = payload.outfit_id else {
        return Err(AppError::bad_request("Outfit ID is required"));
    };
    if let (Some(pickup), Some(ret)) = (payload.pickup_date, payload.return_date) {
        if ret < pickup {
            return Err(AppError::bad_request(
                "Return date cannot be before pickup date",
            ));
        }
    }
    if Outfits::find_by_id(outfit_id).one(db).await?.is_none() {
        return Err(AppError::not_found("Outfit not found"));
    }

    let booking = booked_outfit::ActiveModel {
        outfit_booked_id: NotSet,
        userid: Set(userid),
        outfit_id: Set(outfit_id),
        pickup_date: Set(payload.pickup_date),
        return_date: Set(payload.return_date),
        status: Set(present(payload.status)),
        additional_charges: Set(payload.additional_charges),
    }
    .insert(db)
    .await?;

    tracing::info!(userid, outfit_id, "outfit booked");
    Ok(booked_outfit_from_entity(booking))
}

pub async fn list_booked_outfits<C: ConnectionTrait>(
    db: &C,
    userid: i32,
) -> AppResult<Vec<BookedOutfit>> {
    let items = BookedOutfits::find()
        .filter(booked_outfit::Column::Userid.eq(userid))
        .order_by_asc(booked_outfit::Column::OutfitBookedId)
        .all(db)
        .await?
        .into_iter()
        .map(booked_outfit_from_entity)
        .collect();
    Ok(items)
}

pub async fn available_venues<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Venue>> {
    let items = Venues::find()
        .filter(venues::Column::Status.eq(ACTIVE))
        .order_by_asc(venues::Column::VenueName)
        .all(db)
        .await?
        .into_iter()
        .map(venue_from_entity)
        .collect();
    Ok(items)
}

pub async fn available_gown_packages<C: ConnectionTrait>(db: &C) -> AppResult<Vec<GownPackage>> {
    let items = GownPackages::find()
        .filter(gown_package::Column::Status.eq(ACTIVE))
        .order_by_asc(gown_package::Column::GownPackageName)
        .all(db)
        .await?
        .into_iter()
        .map(|p| GownPackage {
            gown_package_id: p.gown_package_id,
            gown_package_name: p.gown_package_name,
            gown_package_price: p.gown_package_price,
            description: p.description,
        })
        .collect();
    Ok(items)
}

pub async fn available_services<C: ConnectionTrait>(db: &C) -> AppResult<Vec<AdditionalService>> {
    let items = AdditionalServices::find()
        .filter(additional_services::Column::Status.eq(ACTIVE))
        .order_by_asc(additional_services::Column::AddServiceName)
        .all(db)
        .await?
        .into_iter()
        .map(|s| AdditionalService {
            add_service_id: s.add_service_id,
            add_service_name: s.add_service_name,
            add_service_description: s.add_service_description,
            add_service_price: s.add_service_price,
        })
        .collect();
    Ok(items)
}

/// Active suppliers with their contact details and social media handles.
pub async fn available_suppliers<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Supplier>> {
    let rows = Suppliers::find()
        .find_also_related(Users)
        .filter(suppliers::Column::Status.eq(ACTIVE))
        .order_by_asc(suppliers::Column::Service)
        .order_by_asc(users::Column::Lastname)
        .all(db)
        .await?;

    let ids: Vec<i32> = rows.iter().map(|(s, _)| s.supplier_id).collect();
    let mut handles: HashMap<i32, Vec<SocialMedia>> = HashMap::new();
    if !ids.is_empty() {
        for sm in SupplierSocialMedia::find()
            .filter(supplier_social_media::Column::SupplierId.is_in(ids))
            .order_by_asc(supplier_social_media::Column::SocialMediaId)
            .all(db)
            .await?
        {
            handles.entry(sm.supplier_id).or_default().push(SocialMedia {
                platform: sm.platform,
                handle: sm.handle,
                url: sm.url,
            });
        }
    }

    let items = rows
        .into_iter()
        .filter_map(|(supplier, user)| {
            let user = user?;
            let social_media = handles.remove(&supplier.supplier_id).unwrap_or_default();
            Some(supplier_listing(supplier, user, social_media))
        })
        .collect();
    Ok(items)
}

pub async fn gown_package_outfits<C: ConnectionTrait>(
    db: &C,
    gown_package_id: i32,
) -> AppResult<Vec<Outfit>> {
    let items = Outfits::find()
        .join(JoinType::InnerJoin, outfits::Relation::GownPackageOutfits.def())
        .filter(gown_package_outfits::Column::GownPackageId.eq(gown_package_id))
        .order_by_asc(outfits::Column::OutfitName)
        .all(db)
        .await?
        .into_iter()
        .map(outfit_from_entity)
        .collect();
    Ok(items)
}

pub async fn event_types<C: ConnectionTrait>(db: &C) -> AppResult<Vec<EventType>> {
    let items = EventTypes::find()
        .order_by_asc(event_type::Column::EventTypeName)
        .all(db)
        .await?
        .into_iter()
        .map(|t| EventType {
            event_type_id: t.event_type_id,
            event_type_name: t.event_type_name,
        })
        .collect();
    Ok(items)
}

fn supplier_listing(
    supplier: suppliers::Model,
    user: users::Model,
    social_media: Vec<SocialMedia>,
) -> Supplier {
    Supplier {
        supplier_id: supplier.supplier_id,
        name: format!("{} {}", user.firstname, user.lastname),
        firstname: user.firstname,
        lastname: user.lastname,
        service: supplier.service,
        price: supplier.price,
        email: user.email,
        contactnumber: user.contactnumber,
        address: user.address,
        user_img: user.user_img.filter(|img| !img.is_empty()),
        social_media,
    }
}

pub fn outfit_from_entity(model: outfits::Model) -> Outfit {
    Outfit {
        outfit_id: model.outfit_id,
        outfit_name: model.outfit_name,
        outfit_type: model.outfit_type,
        outfit_color: model.outfit_color,
        outfit_desc: model.outfit_desc,
        rent_price: model.rent_price,
        status: model.status,
        outfit_img: model.outfit_img,
        size: model.size,
        weight: model.weight,
    }
}

fn booked_outfit_from_entity(model: booked_outfit::Model) -> BookedOutfit {
    BookedOutfit {
        outfit_booked_id: model.outfit_booked_id,
        userid: model.userid,
        outfit_id: model.outfit_id,
        pickup_date: model.pickup_date,
        return_date: model.return_date,
        status: model.status,
        additional_charges: model.additional_charges,
    }
}

fn venue_from_entity(model: venues::Model) -> Venue {
    Venue {
        venue_id: model.venue_id,
        venue_name: model.venue_name,
        location: model.location,
        venue_price: model.venue_price,
        description: model.description,
        venue_capacity: model.venue_capacity.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn supplier_listing_joins_names() {
        let supplier = suppliers::Model {
            supplier_id: 9,
            userid: 4,
            service: "Photography".into(),
            price: Decimal::new(500_000, 2),
            status: ACTIVE.into(),
        };
        let user = users::Model {
            userid: 4,
            firstname: "Jane".into(),
            lastname: "Smith".into(),
            username: "janesmith".into(),
            email: "jane.smith@test.com".into(),
            contactnumber: "+1234567891".into(),
            password: "hash".into(),
            user_type: "Supplier".into(),
            address: Some("456 Oak St".into()),
            user_img: Some(String::new()),
            created_at: Utc::now().fixed_offset(),
        };
        let listing = supplier_listing(
            supplier,
            user,
            vec![SocialMedia {
                platform: "facebook".into(),
                handle: "janesmith".into(),
                url: Some("https://facebook.com/janesmith".into()),
            }],
        );
        assert_eq!(listing.name, "Jane Smith");
        assert_eq!(listing.price, Decimal::from(5000));
        assert!(listing.user_img.is_none());
        assert_eq!(listing.social_media.len(), 1);
    }

    #[test]
    fn missing_venue_capacity_reads_as_zero() {
        let venue = venue_from_entity(venues::Model {
            venue_id: 1,
            venue_name: "Paseo".into(),
            location: None,
            venue_price: Decimal::ZERO,
            description: None,
            venue_capacity: None,
            image: None,
            status: ACTIVE.into(),
        });
        assert_eq!(venue.venue_capacity, 0);
    }
}
