//! Vehicle submission flow: schema with the picture-count cross-field
//! constraint, multipart submission, and reset-on-success

use super::attachments::{AttachmentError, StagedFile};
use super::controller::{FormController, SubmissionOutcome};
use super::form_state::FieldValue;
use crate::api::SubmissionApi;
use crate::feedback::{FeedbackDispatcher, NotificationSink};
use crate::schema::{Constraint, Encoding, FieldSpec, FormDefinition, Rule};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

pub const VEHICLES_ENDPOINT: &str = "/v1/vehicles";

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\d{11}$").expect("phone pattern is valid");
}

/// The vehicle form definition: multipart body, bearer auth.
///
/// `maxPictures` is itself a validated field (default 2, range 1-10) and is
/// local-only: it bounds `pictures` but is never sent to the server.
pub fn vehicle_form() -> FormDefinition {
    FormDefinition::new(
        "vehicle",
        VEHICLES_ENDPOINT,
        Encoding::Multipart,
        true,
        vec![
            FieldSpec::text(
                "carModel",
                "Car Model",
                vec![
                    Constraint::new(Rule::Required, "Car Model is required"),
                    Constraint::new(Rule::MinChars(3), "Minimum 3 characters required"),
                ],
            ),
            FieldSpec::number(
                "price",
                "Price",
                vec![
                    Constraint::new(Rule::Required, "Price is required"),
                    Constraint::new(Rule::Positive, "Must be a positive number"),
                ],
            )
            .with_default(FieldValue::Number(Some(150.0))),
            FieldSpec::text(
                "phone",
                "Phone Number",
                vec![
                    Constraint::new(Rule::Required, "Phone number is required"),
                    Constraint::new(Rule::Pattern(PHONE_RE.clone()), "Must be exactly 11 digits"),
                ],
            ),
            FieldSpec::text(
                "city",
                "City",
                vec![
                    Constraint::new(Rule::Required, "City is required"),
                    Constraint::new(Rule::MinChars(3), "Minimum 3 characters required"),
                ],
            ),
            FieldSpec::number(
                "maxPictures",
                "Max Number of Pictures",
                vec![
                    Constraint::new(Rule::Required, "Max number of pictures is required"),
                    Constraint::new(Rule::Min(1.0), "At least 1 picture"),
                    Constraint::new(Rule::Max(10.0), "No more than 10 pictures"),
                ],
            )
            .with_default(FieldValue::Number(Some(2.0)))
            .local_only(),
            FieldSpec::file_list(
                "pictures",
                "Pictures",
                vec![Constraint::new(
                    Rule::MaxLenOfField("maxPictures"),
                    "Too many pictures uploaded",
                )],
            ),
        ],
    )
}

/// The vehicle submission screen. Successful submits reset the form and
/// clear the staged thumbnails; failures leave the state intact for retry.
pub struct VehicleFlow<A: SubmissionApi> {
    controller: FormController,
    api: A,
    feedback: FeedbackDispatcher,
}

impl<A: SubmissionApi> VehicleFlow<A> {
    pub fn new(api: A, sink: Arc<dyn NotificationSink>) -> Self {
        let feedback = FeedbackDispatcher::new(
            sink,
            "Vehicle created successfully",
            "An unexpected error occurred.",
        );
        Self {
            controller: FormController::new(vehicle_form()),
            api,
            feedback,
        }
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub fn set_car_model(&mut self, value: &str) {
        self.controller
            .set_field("carModel", FieldValue::Text(value.to_string()));
    }

    pub fn set_price(&mut self, value: f64) {
        self.controller
            .set_field("price", FieldValue::Number(Some(value)));
    }

    pub fn set_phone(&mut self, value: &str) {
        self.controller
            .set_field("phone", FieldValue::Text(value.to_string()));
    }

    pub fn set_city(&mut self, value: &str) {
        self.controller
            .set_field("city", FieldValue::Text(value.to_string()));
    }

    pub fn set_max_pictures(&mut self, value: u32) {
        self.controller
            .set_field("maxPictures", FieldValue::Number(Some(f64::from(value))));
    }

    /// Stage pictures, bounded by the current `maxPictures` value
    pub fn add_pictures(&mut self, files: Vec<StagedFile>) -> Result<(), AttachmentError> {
        self.controller.add_files("pictures", files)
    }

    /// Remove a staged picture; no-op when out of range
    pub fn remove_picture(&mut self, index: usize) {
        self.controller.remove_file("pictures", index);
    }

    pub fn pictures(&self) -> &[StagedFile] {
        self.controller.state().files("pictures")
    }

    /// Validate and submit the listing
    pub async fn submit(&mut self) -> SubmissionOutcome {
        let outcome = self.controller.submit(&self.api).await;
        if let SubmissionOutcome::Completed(result) = &outcome {
            self.feedback.notify(result);
            if result.is_success() {
                self.controller.reset();
            }
        }
        outcome
    }

    pub fn dispose(&mut self) {
        self.controller.dispose();
    }
}
