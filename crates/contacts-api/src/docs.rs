//! API description served at `/api-docs/openapi.json`, and a Swagger UI page
//! at `/api-docs/` that renders it.

use contacts_core::{Contact, ContactFields};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
  contacts::{self, ContactUpdate, Created, Message},
  error::ErrorBody,
};

/// OpenAPI documentation for the contacts API.
#[derive(OpenApi)]
#[openapi(
  info(
    title = "Contacts API",
    description = "API for managing contacts information"
  ),
  paths(
    contacts::root,
    contacts::list,
    contacts::get_one,
    contacts::create,
    contacts::update,
    contacts::remove,
  ),
  components(schemas(
    Contact,
    ContactFields,
    ContactUpdate,
    Created,
    Message,
    ErrorBody,
  )),
  tags(
    (name = "General", description = "Service information"),
    (name = "Contacts", description = "Contact management")
  )
)]
pub struct ApiDoc;

/// Routes for the Swagger UI page and the JSON document it loads.
pub fn swagger_ui() -> SwaggerUi {
  SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
