use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Diesel requires us to define a custom mapping between the Rust enum
// and the database type, if we are not using string.
use crate::schema::*;
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::{AsExpression, FromSqlRow};
use std::io::Write;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::UserRoleEnum)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    OrgOwner,
    OrgAdmin,
    Customer,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::OrganizationStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationStatus {
    Active,
    Suspended,
    Trial,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::BillingCycleEnum)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Annual,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::BookingStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Delivered,
    PickedUp,
    Completed,
    Cancelled,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::InventoryStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    Available,
    Rented,
    Maintenance,
    Retired,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::QuoteStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Quoted,
    Accepted,
    Rejected,
    Completed,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::PaymentMethodEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    CreditCard,
    DebitCard,
    Ach,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::PaymentStatusEnum)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

//This is for postgres. For other databases the type might be different.
impl ToSql<sql_types::UserRoleEnum, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            UserRole::SuperAdmin => out.write_all(b"super_admin")?,
            UserRole::OrgOwner => out.write_all(b"org_owner")?,
            UserRole::OrgAdmin => out.write_all(b"org_admin")?,
            UserRole::Customer => out.write_all(b"customer")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::UserRoleEnum, Pg> for UserRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"super_admin" => Ok(UserRole::SuperAdmin),
            b"org_owner" => Ok(UserRole::OrgOwner),
            b"org_admin" => Ok(UserRole::OrgAdmin),
            b"customer" => Ok(UserRole::Customer),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}
// The following is the traits implementation for other Enums.
impl ToSql<sql_types::OrganizationStatusEnum, Pg> for OrganizationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            OrganizationStatus::Active => out.write_all(b"active")?,
            OrganizationStatus::Suspended => out.write_all(b"suspended")?,
            OrganizationStatus::Trial => out.write_all(b"trial")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::OrganizationStatusEnum, Pg> for OrganizationStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"active" => Ok(OrganizationStatus::Active),
            b"suspended" => Ok(OrganizationStatus::Suspended),
            b"trial" => Ok(OrganizationStatus::Trial),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::BillingCycleEnum, Pg> for BillingCycle {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            BillingCycle::Monthly => out.write_all(b"monthly")?,
            BillingCycle::Quarterly => out.write_all(b"quarterly")?,
            BillingCycle::Annual => out.write_all(b"annual")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::BillingCycleEnum, Pg> for BillingCycle {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"monthly" => Ok(BillingCycle::Monthly),
            b"quarterly" => Ok(BillingCycle::Quarterly),
            b"annual" => Ok(BillingCycle::Annual),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::BookingStatusEnum, Pg> for BookingStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            BookingStatus::Pending => out.write_all(b"pending")?,
            BookingStatus::Confirmed => out.write_all(b"confirmed")?,
            BookingStatus::Delivered => out.write_all(b"delivered")?,
            BookingStatus::PickedUp => out.write_all(b"picked_up")?,
            BookingStatus::Completed => out.write_all(b"completed")?,
            BookingStatus::Cancelled => out.write_all(b"cancelled")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::BookingStatusEnum, Pg> for BookingStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(BookingStatus::Pending),
            b"confirmed" => Ok(BookingStatus::Confirmed),
            b"delivered" => Ok(BookingStatus::Delivered),
            b"picked_up" => Ok(BookingStatus::PickedUp),
            b"completed" => Ok(BookingStatus::Completed),
            b"cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::InventoryStatusEnum, Pg> for InventoryStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            InventoryStatus::Available => out.write_all(b"available")?,
            InventoryStatus::Rented => out.write_all(b"rented")?,
            InventoryStatus::Maintenance => out.write_all(b"maintenance")?,
            InventoryStatus::Retired => out.write_all(b"retired")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::InventoryStatusEnum, Pg> for InventoryStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"available" => Ok(InventoryStatus::Available),
            b"rented" => Ok(InventoryStatus::Rented),
            b"maintenance" => Ok(InventoryStatus::Maintenance),
            b"retired" => Ok(InventoryStatus::Retired),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::QuoteStatusEnum, Pg> for QuoteStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            QuoteStatus::Pending => out.write_all(b"pending")?,
            QuoteStatus::Quoted => out.write_all(b"quoted")?,
            QuoteStatus::Accepted => out.write_all(b"accepted")?,
            QuoteStatus::Rejected => out.write_all(b"rejected")?,
            QuoteStatus::Completed => out.write_all(b"completed")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::QuoteStatusEnum, Pg> for QuoteStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(QuoteStatus::Pending),
            b"quoted" => Ok(QuoteStatus::Quoted),
            b"accepted" => Ok(QuoteStatus::Accepted),
            b"rejected" => Ok(QuoteStatus::Rejected),
            b"completed" => Ok(QuoteStatus::Completed),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::PaymentMethodEnum, Pg> for PaymentMethodKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PaymentMethodKind::CreditCard => out.write_all(b"credit_card")?,
            PaymentMethodKind::DebitCard => out.write_all(b"debit_card")?,
            PaymentMethodKind::Ach => out.write_all(b"ach")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::PaymentMethodEnum, Pg> for PaymentMethodKind {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"credit_card" => Ok(PaymentMethodKind::CreditCard),
            b"debit_card" => Ok(PaymentMethodKind::DebitCard),
            b"ach" => Ok(PaymentMethodKind::Ach),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::PaymentStatusEnum, Pg> for PaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            PaymentStatus::Pending => out.write_all(b"pending")?,
            PaymentStatus::Completed => out.write_all(b"completed")?,
            PaymentStatus::Failed => out.write_all(b"failed")?,
            PaymentStatus::Refunded => out.write_all(b"refunded")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::PaymentStatusEnum, Pg> for PaymentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(PaymentStatus::Pending),
            b"completed" => Ok(PaymentStatus::Completed),
            b"failed" => Ok(PaymentStatus::Failed),
            b"refunded" => Ok(PaymentStatus::Refunded),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub business_name: String,
    pub contact_email: String,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub status: OrganizationStatus,
    pub subscription_amount: f64,
    pub billing_cycle: BillingCycle,
    pub trial_ends_at: Option<NaiveDate>,
    pub next_billing_date: Option<NaiveDate>,
    pub tax_rate: f64,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    // Reduced projection served to the public booking/login pages. Billing
    // fields, tax rate, and status stay internal.
    pub fn to_public_organization(&self) -> PublicOrganization {
        PublicOrganization {
            name: self.name.clone(),
            slug: self.slug.clone(),
            phone: self.phone.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            website: self.website.clone(),
            logo_url: self.logo_url.clone(),
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicOrganization {
    pub name: String,
    pub slug: String,
    pub phone: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct NewOrganization {
    pub name: String,
    pub slug: String,
    pub business_name: String,
    pub contact_email: String,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub status: OrganizationStatus,
    pub subscription_amount: f64,
    pub billing_cycle: BillingCycle,
    pub trial_ends_at: Option<NaiveDate>,
    pub next_billing_date: Option<NaiveDate>,
    pub tax_rate: f64,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub organization_id: Option<i32>,
    pub email: String,
    pub password: String, // Hashed!
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn to_publish_user(&self) -> PublishUser {
        PublishUser {
            id: self.id,
            organization_id: self.organization_id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            role: self.role,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(
            self.role,
            UserRole::SuperAdmin | UserRole::OrgOwner | UserRole::OrgAdmin
        )
    }
}

// The password hash never crosses the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishUser {
    pub id: i32,
    pub organization_id: Option<i32>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub organization_id: Option<i32>,
    pub email: String,
    pub password: String, // Hash this before inserting!
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSession {
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = dumpster_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct DumpsterType {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub size_yards: i32,
    pub description: Option<String>,
    pub daily_rate: f64,
    pub weekly_rate: f64,
    pub weight_limit_tons: f64,
    pub overage_fee_per_ton: f64,
    pub is_active: bool,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = dumpster_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct NewDumpsterType {
    pub organization_id: i32,
    pub name: String,
    pub size_yards: i32,
    pub description: Option<String>,
    pub daily_rate: f64,
    pub weekly_rate: f64,
    pub weight_limit_tons: f64,
    pub overage_fee_per_ton: f64,
    pub is_active: bool,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(belongs_to(DumpsterType))]
#[diesel(table_name = dumpster_inventory)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct DumpsterInventoryUnit {
    pub id: i32,
    pub organization_id: i32,
    pub dumpster_type_id: i32,
    pub unit_number: String,
    pub status: InventoryStatus,
    pub current_location: Option<String>,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(belongs_to(Organization))]
#[diesel(belongs_to(DumpsterType))]
#[diesel(table_name = dumpster_inventory)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct NewDumpsterInventoryUnit {
    pub organization_id: i32,
    pub dumpster_type_id: i32,
    pub unit_number: String,
    pub status: InventoryStatus,
    pub current_location: Option<String>,
}

#[derive(
    Queryable, Identifiable, Associations, Debug, Clone, PartialEq, Serialize, Deserialize,
)]
#[diesel(belongs_to(Organization))]
#[diesel(belongs_to(DumpsterType))]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub organization_id: i32,
    pub customer_id: Option<i32>,
    pub dumpster_type_id: i32,
    pub dumpster_inventory_id: Option<i32>,
    pub booking_number: String,
    pub status: BookingStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_state: String,
    pub delivery_zip_code: String,
    pub delivery_date: NaiveDate,
    pub pickup_date: Option<NaiveDate>,
    pub rental_days: i32,
    // Price snapshot, frozen at creation. Later rate-card edits never
    // rewrite what the customer was quoted.
    pub base_rate: f64,
    pub daily_rate: f64,
    pub delivery_fee: f64,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub deposit_amount: f64,
    pub amount_paid: f64,
    pub balance_due: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Organization))]
#[diesel(belongs_to(DumpsterType))]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBooking {
    pub organization_id: i32,
    pub customer_id: Option<i32>,
    pub dumpster_type_id: i32,
    pub dumpster_inventory_id: Option<i32>,
    pub booking_number: String,
    pub status: BookingStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_state: String,
    pub delivery_zip_code: String,
    pub delivery_date: NaiveDate,
    pub pickup_date: Option<NaiveDate>,
    pub rental_days: i32,
    pub base_rate: f64,
    pub daily_rate: f64,
    pub delivery_fee: f64,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub deposit_amount: f64,
    pub amount_paid: f64,
    pub balance_due: f64,
    pub notes: Option<String>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = quotes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i32,
    pub organization_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_address: String,
    pub service_city: String,
    pub service_state: String,
    pub service_zip_code: String,
    pub item_description: String,
    pub preferred_date: Option<NaiveDate>,
    pub status: QuoteStatus,
    pub quoted_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = quotes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub organization_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_address: String,
    pub service_city: String,
    pub service_state: String,
    pub service_zip_code: String,
    pub item_description: String,
    pub preferred_date: Option<NaiveDate>,
    pub status: QuoteStatus,
    pub quoted_amount: Option<f64>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(belongs_to(Booking))]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i32,
    pub organization_id: i32,
    pub booking_id: Option<i32>,
    pub quote_id: Option<i32>,
    pub amount: f64,
    pub method: PaymentMethodKind,
    pub status: PaymentStatus,
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Organization))]
#[diesel(belongs_to(Booking))]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPayment {
    pub organization_id: i32,
    pub booking_id: Option<i32>,
    pub quote_id: Option<i32>,
    pub amount: f64,
    pub method: PaymentMethodKind,
    pub status: PaymentStatus,
    pub reference: Option<String>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = service_areas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct ServiceArea {
    pub id: i32,
    pub organization_id: i32,
    pub zip_code: String,
    pub delivery_fee: f64,
    pub is_active: bool,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = service_areas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct NewServiceArea {
    pub organization_id: i32,
    pub zip_code: String,
    pub delivery_fee: f64,
    pub is_active: bool,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = organization_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSettings {
    pub id: i32,
    pub organization_id: i32,
    pub min_rental_days: i32,
    pub lead_time_days: i32,
    pub turnaround_hours: i32,
    pub allow_same_day_pickup: bool,
    pub cancellation_notice_hours: i32,
    pub cancellation_fee: f64,
    pub notify_on_booking: bool,
    pub notify_on_cancellation: bool,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = organization_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewOrganizationSettings {
    pub organization_id: i32,
    pub min_rental_days: i32,
    pub lead_time_days: i32,
    pub turnaround_hours: i32,
    pub allow_same_day_pickup: bool,
    pub cancellation_notice_hours: i32,
    pub cancellation_fee: f64,
    pub notify_on_booking: bool,
    pub notify_on_cancellation: bool,
}

impl NewOrganizationSettings {
    pub fn defaults_for(org_id: i32) -> Self {
        NewOrganizationSettings {
            organization_id: org_id,
            min_rental_days: 1,
            lead_time_days: 1,
            turnaround_hours: 24,
            allow_same_day_pickup: false,
            cancellation_notice_hours: 24,
            cancellation_fee: 0.0,
            notify_on_booking: true,
            notify_on_cancellation: true,
        }
    }
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = organization_invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInvitation {
    pub id: i32,
    pub organization_id: i32,
    pub email: String,
    pub role: UserRole,
    pub invited_by: i32,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = organization_invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewOrganizationInvitation {
    pub organization_id: i32,
    pub email: String,
    pub role: UserRole,
    pub invited_by: i32,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = api_keys)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub key_prefix: String,
    pub key_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    pub fn to_publish_api_key(&self) -> PublishApiKey {
        PublishApiKey {
            id: self.id,
            organization_id: self.organization_id,
            name: self.name.clone(),
            key_prefix: self.key_prefix.clone(),
            created_at: self.created_at,
            last_used_at: self.last_used_at,
        }
    }
}

// The hash stays server-side; the prefix is enough for the dashboard list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishApiKey {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub key_prefix: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = api_keys)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewApiKey {
    pub organization_id: i32,
    pub name: String,
    pub key_prefix: String,
    pub key_hash: String,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = webhooks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: i32,
    pub organization_id: i32,
    pub url: String,
    pub secret: String,
    pub events: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Webhook {
    pub fn to_publish_webhook(&self) -> PublishWebhook {
        PublishWebhook {
            id: self.id,
            organization_id: self.organization_id,
            url: self.url.clone(),
            events: self.events.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishWebhook {
    pub id: i32,
    pub organization_id: i32,
    pub url: String,
    pub events: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(Organization))]
#[diesel(table_name = webhooks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewWebhook {
    pub organization_id: i32,
    pub url: String,
    pub secret: String,
    pub events: Vec<String>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_user_has_no_password_field() {
        let user = User {
            id: 7,
            organization_id: Some(2),
            email: "owner@example.com".into(),
            password: "$2b$10$abcdefghijklmnopqrstuv".into(),
            first_name: "Pat".into(),
            last_name: "Ortega".into(),
            phone: None,
            role: UserRole::OrgOwner,
            last_login_at: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(user.to_publish_user()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "owner@example.com");
        assert_eq!(json["role"], "org_owner");
    }

    #[test]
    fn public_organization_excludes_billing_fields() {
        let org = Organization {
            id: 1,
            name: "Acme Dumpsters".into(),
            slug: "acme".into(),
            business_name: "Acme Dumpsters LLC".into(),
            contact_email: "ops@acme.test".into(),
            phone: "5551234567".into(),
            address: None,
            city: Some("Columbus".into()),
            state: Some("OH".into()),
            zip_code: None,
            website: None,
            logo_url: None,
            primary_color: Some("#004488".into()),
            secondary_color: None,
            status: OrganizationStatus::Active,
            subscription_amount: 99.0,
            billing_cycle: BillingCycle::Monthly,
            trial_ends_at: None,
            next_billing_date: None,
            tax_rate: 0.0725,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(org.to_public_organization()).unwrap();
        assert!(json.get("taxRate").is_none());
        assert!(json.get("subscriptionAmount").is_none());
        assert!(json.get("status").is_none());
        assert_eq!(json["slug"], "acme");
        assert_eq!(json["primaryColor"], "#004488");
    }

    #[test]
    fn enum_wire_names_match_contract() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::PickedUp).unwrap(),
            "\"picked_up\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethodKind::CreditCard).unwrap(),
            "\"credit_card\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
    }
}
