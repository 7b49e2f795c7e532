use crate::models::{PatientIntent, PatientSentiment};

/// Canned replies keyed by intent. Clinic name and nurse line come from config.
#[derive(Debug, Clone)]
pub struct ResponseTemplates {
    clinic_name: String,
    nurse_line_phone: String,
}

impl ResponseTemplates {
    pub fn new(clinic_name: impl Into<String>, nurse_line_phone: impl Into<String>) -> Self {
        Self {
            clinic_name: clinic_name.into(),
            nurse_line_phone: nurse_line_phone.into(),
        }
    }

    pub fn emergency(&self) -> String {
        format!(
            "If you are experiencing a medical emergency, please call 911 or go to the nearest emergency room immediately.\n\n\
             Do not wait for a reply to this message. Once you are safe, our nurse line at {} can help coordinate follow-up care with the {} team.",
            self.nurse_line_phone, self.clinic_name
        )
    }

    pub fn complication(&self, matched_keywords: &[String]) -> String {
        let symptoms = if matched_keywords.is_empty() {
            "these symptoms".to_string()
        } else {
            matched_keywords.join(", ")
        };

        format!(
            "Thank you for letting us know about the {}. Some reactions are expected after treatment, but we want a nurse to review this with you.\n\n\
             I've flagged your message for our medical team. If symptoms get worse, or you notice difficulty breathing, vision changes or spreading redness, call our nurse line right away at {}.",
            symptoms, self.nurse_line_phone
        )
    }

    pub fn reply(&self, intent: PatientIntent) -> String {
        let text = match intent {
            PatientIntent::EmergencyMedical => return self.emergency(),
            PatientIntent::SideEffectReport => return self.complication(&[]),
            PatientIntent::TreatmentQuestion => {
                return format!(
                    "Great question! {} offers injectables (Botox, Dysport, dermal fillers), skin rejuvenation \
                     (peels, microneedling, HydraFacials, IPL) and body contouring. Would you like details on a \
                     specific treatment or a consultation with one of our providers?",
                    self.clinic_name
                )
            }
            PatientIntent::LocationHours => {
                return format!(
                    "{} is open Monday to Friday 9:00 AM - 7:00 PM and Saturday 9:00 AM - 5:00 PM, closed Sunday. \
                     You can reach the front desk at {}. Would you like directions or help booking?",
                    self.clinic_name, self.nurse_line_phone
                )
            }
            PatientIntent::UrgentConcern => {
                return format!(
                    "I understand you have an urgent concern and I'm flagging it for our team now. \
                     For urgent medical questions call our nurse line at {}; for emergencies call 911.",
                    self.nurse_line_phone
                )
            }
            PatientIntent::AppointmentBooking => {
                "I'd be happy to help you book an appointment! What type of treatment are you interested in? \
                 Our most popular services include Botox & Dysport, dermal fillers, chemical peels, microneedling \
                 and HydraFacials. Once you let me know, I can check availability and find a time that works for you."
            }
            PatientIntent::AppointmentInquiry => {
                "I can help with your appointments! Your upcoming visits are listed under \"My Appointments\" \
                 in the patient portal. Is there something specific you'd like to know, such as the time or how to prepare?"
            }
            PatientIntent::AppointmentCancellation => {
                "I understand you need to cancel. You can cancel from \"My Appointments\" in your portal. \
                 Cancellations made less than 24 hours before the appointment may be subject to a fee. \
                 Would you prefer to reschedule instead?"
            }
            PatientIntent::AppointmentRescheduling => {
                "No problem! Open \"My Appointments\" in your portal, select the visit and choose \"Reschedule\" \
                 to see open times. When would work better for you?"
            }
            PatientIntent::PostTreatmentFollowup => {
                "Thank you for following up! Keep the treated area clean, avoid strenuous exercise for 24-48 hours, \
                 stay hydrated and avoid direct sun. Detailed aftercare is in the \"Aftercare\" section of your portal. \
                 How are you feeling?"
            }
            PatientIntent::PreTreatmentQuestion => {
                "Great thinking to prepare! Avoid blood thinners and alcohol for 48 hours before, arrive with clean \
                 skin, eat a light meal and bring a list of your medications. Specific instructions are under \
                 \"My Appointments\" in your portal."
            }
            PatientIntent::PricingInquiry => {
                "Prices depend on the service and treatment area. Botox starts at $12/unit, dermal fillers at \
                 $650/syringe, HydraFacials at $175 and microneedling at $300. We also offer packages and memberships. \
                 Would you like to book a consultation to discuss pricing?"
            }
            PatientIntent::GeneralInquiry => {
                "Thank you for reaching out! I can help with booking or managing appointments, treatment information \
                 and pricing, pre and post-treatment care, and location and hours. How can I help you today?"
            }
            PatientIntent::Feedback => {
                "Thank you for wanting to share your feedback! You can submit it through your portal, leave a review \
                 online or speak directly with our management team. Would you like me to connect you with someone?"
            }
        };

        text.to_string()
    }

    /// Prefixes the reply for frustrated (when the name is known) or concerned
    /// patients.
    pub fn adjust_for_sentiment(
        &self,
        reply: String,
        sentiment: PatientSentiment,
        patient_name: Option<&str>,
    ) -> String {
        match (sentiment, patient_name) {
            (PatientSentiment::Frustrated, Some(name)) => format!(
                "{}, I apologize for any inconvenience you've experienced. {}",
                name, reply
            ),
            (PatientSentiment::Concerned, _) => format!(
                "I understand your concerns and want to make sure you feel supported. {}",
                reply
            ),
            _ => reply,
        }
    }
}
