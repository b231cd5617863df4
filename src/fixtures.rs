// src/fixtures.rs

//! Sample proposals and the in-memory store that serves them when no remote
//! backend is configured. Everything here is lost on restart.

use crate::backend::ProposalBackend;
use crate::domain::{
    query, CancelConfirmation, Listing, Proposal, ProposalDraft, ProposalFilters, ProposalStatus,
    ProposalUpdate, User,
};
use crate::gateway::GatewayError;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::{PoisonError, RwLock};

pub struct FixtureStore {
    records: RwLock<Vec<Proposal>>,
}

impl FixtureStore {
    pub fn new(records: Vec<Proposal>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn with_samples() -> Self {
        Self::new(sample_proposals())
    }

    fn read<T>(&self, f: impl FnOnce(&[Proposal]) -> T) -> T {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        f(&records)
    }

    fn modify(
        &self,
        id: &str,
        f: impl FnOnce(&mut Proposal, DateTime<Utc>),
    ) -> Result<Proposal, GatewayError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let record = records
            .iter_mut()
            .find(|p| p.unique_id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("proposal {id}")))?;
        f(record, Utc::now());
        Ok(record.clone())
    }

    fn ensure_exists(&self, id: &str) -> Result<(), GatewayError> {
        self.read(|records| {
            if records.iter().any(|p| p.unique_id == id) {
                Ok(())
            } else {
                Err(GatewayError::NotFound(format!("proposal {id}")))
            }
        })
    }
}

impl ProposalBackend for FixtureStore {
    fn search_proposals(&self, filters: &ProposalFilters) -> Result<Vec<Proposal>, GatewayError> {
        Ok(self.read(|records| query(records, filters)))
    }

    fn get_proposal(&self, id: &str) -> Result<Proposal, GatewayError> {
        self.read(|records| records.iter().find(|p| p.unique_id == id).cloned())
            .ok_or_else(|| GatewayError::NotFound(format!("proposal {id}")))
    }

    fn create_proposal(&self, draft: &ProposalDraft) -> Result<Proposal, GatewayError> {
        let now = Utc::now();
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let id = next_id(&records, now);
        let created = draft.clone().into_proposal(id, now);
        records.push(created.clone());
        tracing::info!(proposal_id = %created.unique_id, "fixture proposal created");
        Ok(created)
    }

    fn update_status(&self, id: &str, status: ProposalStatus) -> Result<Proposal, GatewayError> {
        self.modify(id, |p, now| {
            // The permissive transition table never refuses.
            if let Err(e) = p.set_status(status, now) {
                tracing::warn!(error = %e, "status change refused");
            }
        })
    }

    fn update_proposal(
        &self,
        id: &str,
        update: &ProposalUpdate,
    ) -> Result<Proposal, GatewayError> {
        self.modify(id, |p, now| p.apply_terms(update, now))
    }

    fn cancel_proposal(
        &self,
        id: &str,
        reason: &str,
        confirmed: CancelConfirmation,
    ) -> Result<Proposal, GatewayError> {
        tracing::debug!(proposal_id = id, reason, "fixture cancellation");
        self.modify(id, |p, now| p.cancel(confirmed, now))
    }

    fn remind_guest(&self, id: &str) -> Result<(), GatewayError> {
        self.ensure_exists(id)
    }

    fn remind_host(&self, id: &str) -> Result<(), GatewayError> {
        self.ensure_exists(id)
    }

    fn search_listings(&self, term: &str) -> Result<Vec<Listing>, GatewayError> {
        Ok(self.read(|records| {
            let mut found: Vec<Listing> = Vec::new();
            for listing in records.iter().map(Listing::from_proposal) {
                if listing.matches(term) && !found.iter().any(|l| l.unique_id == listing.unique_id) {
                    found.push(listing);
                }
            }
            found
        }))
    }

    fn search_users(&self, term: &str) -> Result<Vec<User>, GatewayError> {
        Ok(self.read(|records| {
            let mut found: Vec<User> = Vec::new();
            for user in records.iter().map(|p| User::from_guest(&p.guest)) {
                if user.matches(term) && !found.iter().any(|u| u.key() == user.key()) {
                    found.push(user);
                }
            }
            found
        }))
    }
}

fn next_id(records: &[Proposal], now: DateTime<Utc>) -> String {
    let mut n = now.timestamp_millis();
    loop {
        let id = format!("PROP-{n}");
        if !records.iter().any(|p| p.unique_id == id) {
            return id;
        }
        n += 1;
    }
}

/// The five sample proposals shown when running against fixtures.
pub fn sample_proposals() -> Vec<Proposal> {
    sample_data().iter().map(Proposal::from_value).collect()
}

fn sample_data() -> Vec<Value> {
    vec![
        json!({
            "uniqueId": "PROP-2026-001",
            "status": "Host Review",
            "createdDate": "2026-01-15",
            "modifiedDate": "2026-01-20",
            "guest": {
                "firstName": "Emily",
                "lastName": "Rodriguez",
                "email": "emily.rodriguez@example.com",
                "phoneNumber": "+1 (555) 123-4567",
                "profilePhoto": "https://i.pravatar.cc/150?img=1",
                "aboutMe": "Software engineer looking for a quiet place to work remotely. I enjoy reading, hiking, and cooking.",
                "needForSpace": "Need a peaceful workspace with good internet connectivity for remote work.",
                "specialNeeds": "Require high-speed internet (100+ Mbps) and a dedicated workspace.",
                "isUsabilityTester": true
            },
            "host": {
                "firstName": "Michael",
                "lastName": "Chen",
                "email": "michael.chen@example.com",
                "phoneNumber": "+1 (555) 987-6543",
                "profilePhoto": "https://i.pravatar.cc/150?img=12",
                "isUsabilityTester": false
            },
            "listing": {
                "name": "Modern Downtown Apartment",
                "uniqueId": "LIST-2026-A101",
                "address": "123 Main Street, Unit 4B, San Francisco, CA 94102",
                "rentalType": "Apartment",
                "photos": [
                    "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=400",
                    "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=400"
                ],
                "damageDeposit": 1500,
                "cleaningCost": 150,
                "lastModified": "2026-01-10",
                "houseRules": ["No smoking", "No pets", "Quiet hours after 10 PM", "Keep common areas clean"]
            },
            "pricing": {
                "nightlyPrice": 85,
                "totalReservationPrice": 2380,
                "hostCompensation": 2000,
                "totalCompensation": 2150,
                "pricePerFourWeeks": 2380,
                "initialPayment": 4030,
                "numberOfNights": 28,
                "numberOfWeeks": 4,
                "securityDeposit": 1500
            },
            "reservation": {
                "moveInDate": "2026-02-01",
                "checkInDate": "2026-02-01",
                "checkOutDate": "2026-02-28",
                "reservationSpanWeeks": 4,
                "weeklySchedule": [true, true, true, true, true, true, true],
                "guestDesiredPattern": "Full Time",
                "strictMoveIn": false,
                "isFullTime": true
            }
        }),
        json!({
            "uniqueId": "PROP-2026-002",
            "status": "Proposal Submitted by guest - Awaiting Rental Application",
            "createdDate": "2026-01-18",
            "modifiedDate": "2026-01-21",
            "guest": {
                "firstName": "David",
                "lastName": "Kim",
                "email": "david.kim@example.com",
                "phoneNumber": "+1 (555) 234-5678",
                "profilePhoto": "https://i.pravatar.cc/150?img=33",
                "aboutMe": "Graduate student studying architecture. Clean, organized, and respectful.",
                "needForSpace": "Looking for affordable housing near campus for the semester.",
                "specialNeeds": "Need access to public transportation.",
                "isUsabilityTester": false
            },
            "host": {
                "firstName": "Sarah",
                "lastName": "Johnson",
                "email": "sarah.johnson@example.com",
                "phoneNumber": "+1 (555) 345-6789",
                "profilePhoto": "https://i.pravatar.cc/150?img=5",
                "isUsabilityTester": true
            },
            "listing": {
                "name": "Cozy Studio near University",
                "uniqueId": "LIST-2026-B205",
                "address": "456 College Avenue, Berkeley, CA 94704",
                "rentalType": "Studio",
                "photos": [
                    "https://images.unsplash.com/photo-1536376072261-38c75010e6c9?w=400",
                    "https://images.unsplash.com/photo-1493809842364-78817add7ffb?w=400"
                ],
                "damageDeposit": 800,
                "cleaningCost": 100,
                "lastModified": "2026-01-12",
                "houseRules": ["No smoking", "Pets allowed with deposit", "Respect neighbors"]
            },
            "pricing": {
                "nightlyPrice": 60,
                "totalReservationPrice": 2520,
                "hostCompensation": 2100,
                "totalCompensation": 2200,
                "pricePerFourWeeks": 1680,
                "initialPayment": 2580,
                "numberOfNights": 42,
                "numberOfWeeks": 6,
                "securityDeposit": 800
            },
            "reservation": {
                "moveInDate": "2026-02-15",
                "checkInDate": "2026-02-15",
                "checkOutDate": "2026-03-28",
                "reservationSpanWeeks": 6,
                "weeklySchedule": [true, true, true, true, true, true, true],
                "guestDesiredPattern": "Full Time",
                "strictMoveIn": true,
                "isFullTime": true
            }
        }),
        json!({
            "uniqueId": "PROP-2026-003",
            "status": "Host Counteroffer Submitted / Awaiting Guest Review",
            "createdDate": "2026-01-12",
            "modifiedDate": "2026-01-22",
            "guest": {
                "firstName": "Olivia",
                "lastName": "Martinez",
                "email": "olivia.martinez@example.com",
                "phoneNumber": "+1 (555) 456-7890",
                "profilePhoto": "https://i.pravatar.cc/150?img=9",
                "aboutMe": "Healthcare professional on temporary assignment. Non-smoker, no pets.",
                "needForSpace": "Need temporary housing for 3-month medical rotation.",
                "specialNeeds": "Furnished space preferred. Parking space required.",
                "isUsabilityTester": false
            },
            "host": {
                "firstName": "Robert",
                "lastName": "Taylor",
                "email": "robert.taylor@example.com",
                "phoneNumber": "+1 (555) 567-8901",
                "profilePhoto": "https://i.pravatar.cc/150?img=15",
                "isUsabilityTester": false
            },
            "listing": {
                "name": "Furnished 1BR with Parking",
                "uniqueId": "LIST-2026-C310",
                "address": "789 Hospital Drive, Unit 12, Los Angeles, CA 90024",
                "rentalType": "1 Bedroom",
                "photos": [
                    "https://images.unsplash.com/photo-1515263487990-61b07816b324?w=400",
                    "https://images.unsplash.com/photo-1484154218962-a197022b5858?w=400"
                ],
                "damageDeposit": 1200,
                "cleaningCost": 200,
                "lastModified": "2026-01-08",
                "houseRules": ["No smoking", "No pets", "No parties", "Maintain cleanliness"]
            },
            "pricing": {
                "nightlyPrice": 95,
                "totalReservationPrice": 7980,
                "hostCompensation": 6800,
                "totalCompensation": 7100,
                "pricePerFourWeeks": 2660,
                "initialPayment": 4060,
                "numberOfNights": 84,
                "numberOfWeeks": 12,
                "securityDeposit": 1200
            },
            "reservation": {
                "moveInDate": "2026-03-01",
                "checkInDate": "2026-03-01",
                "checkOutDate": "2026-05-23",
                "reservationSpanWeeks": 12,
                "weeklySchedule": [true, true, true, true, true, false, false],
                "guestDesiredPattern": "Weekdays Only",
                "strictMoveIn": false,
                "isFullTime": false
            }
        }),
        json!({
            "uniqueId": "PROP-2026-004",
            "status": "Lease Documents Sent for Signatures",
            "createdDate": "2026-01-05",
            "modifiedDate": "2026-01-22",
            "guest": {
                "firstName": "James",
                "lastName": "Anderson",
                "email": "james.anderson@example.com",
                "phoneNumber": "+1 (555) 678-9012",
                "profilePhoto": "https://i.pravatar.cc/150?img=52",
                "aboutMe": "Business consultant traveling for work. Professional and quiet.",
                "needForSpace": "Need executive housing during project assignment.",
                "specialNeeds": "Must have home office setup and strong WiFi.",
                "isUsabilityTester": true
            },
            "host": {
                "firstName": "Jennifer",
                "lastName": "Williams",
                "email": "jennifer.williams@example.com",
                "phoneNumber": "+1 (555) 789-0123",
                "profilePhoto": "https://i.pravatar.cc/150?img=20",
                "isUsabilityTester": false
            },
            "listing": {
                "name": "Executive Condo with Office",
                "uniqueId": "LIST-2026-D405",
                "address": "321 Business Plaza, Unit 8A, Seattle, WA 98101",
                "rentalType": "2 Bedroom",
                "photos": [
                    "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=400",
                    "https://images.unsplash.com/photo-1522771739844-6a9f6d5f14af?w=400"
                ],
                "damageDeposit": 2000,
                "cleaningCost": 250,
                "lastModified": "2026-01-03",
                "houseRules": ["No smoking", "No pets", "Professional environment", "Visitor policy"]
            },
            "pricing": {
                "nightlyPrice": 120,
                "totalReservationPrice": 10080,
                "hostCompensation": 8500,
                "totalCompensation": 8900,
                "pricePerFourWeeks": 3360,
                "initialPayment": 5610,
                "numberOfNights": 84,
                "numberOfWeeks": 12,
                "securityDeposit": 2000
            },
            "reservation": {
                "moveInDate": "2026-02-10",
                "checkInDate": "2026-02-10",
                "checkOutDate": "2026-05-04",
                "reservationSpanWeeks": 12,
                "weeklySchedule": [true, true, true, true, true, true, true],
                "guestDesiredPattern": "Full Time",
                "strictMoveIn": true,
                "isFullTime": true
            }
        }),
        json!({
            "uniqueId": "PROP-2026-005",
            "status": "Proposal Cancelled by Guest",
            "createdDate": "2026-01-08",
            "modifiedDate": "2026-01-19",
            "guest": {
                "firstName": "Sophia",
                "lastName": "Brown",
                "email": "sophia.brown@example.com",
                "phoneNumber": "+1 (555) 890-1234",
                "profilePhoto": "https://i.pravatar.cc/150?img=44",
                "aboutMe": "Artist seeking creative space. Vegetarian, non-smoker.",
                "needForSpace": "Looking for inspiring space to work on art projects.",
                "specialNeeds": "Natural lighting and space for art supplies.",
                "isUsabilityTester": false
            },
            "host": {
                "firstName": "Daniel",
                "lastName": "Lee",
                "email": "daniel.lee@example.com",
                "phoneNumber": "+1 (555) 901-2345",
                "profilePhoto": "https://i.pravatar.cc/150?img=60",
                "isUsabilityTester": false
            },
            "listing": {
                "name": "Bright Loft Space",
                "uniqueId": "LIST-2026-E501",
                "address": "654 Art District, Loft 3, Portland, OR 97201",
                "rentalType": "Loft",
                "photos": [
                    "https://images.unsplash.com/photo-1513694203232-719a280e022f?w=400",
                    "https://images.unsplash.com/photo-1556020685-ae41abfc9365?w=400"
                ],
                "damageDeposit": 1000,
                "cleaningCost": 120,
                "lastModified": "2026-01-06",
                "houseRules": ["No smoking", "Pets negotiable", "Respect community", "Clean up after projects"]
            },
            "pricing": {
                "nightlyPrice": 70,
                "totalReservationPrice": 1960,
                "hostCompensation": 1650,
                "totalCompensation": 1730,
                "pricePerFourWeeks": 1960,
                "initialPayment": 3080,
                "numberOfNights": 28,
                "numberOfWeeks": 4,
                "securityDeposit": 1000
            },
            "reservation": {
                "moveInDate": "2026-03-15",
                "checkInDate": "2026-03-15",
                "checkOutDate": "2026-04-11",
                "reservationSpanWeeks": 4,
                "weeklySchedule": [true, true, true, true, true, true, true],
                "guestDesiredPattern": "Full Time",
                "strictMoveIn": false,
                "isFullTime": true
            }
        }),
    ]
}
