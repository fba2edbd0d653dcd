// src/sample.rs
//! Fixed demonstration records, the last resort of the refresh chain so the
//! display is never empty.

use chrono::NaiveDate;

use crate::model::{DutyRecord, TimeSlot};

/// (institution, specialty, address, phone, area)
const SAMPLE: [(&str, &str, &str, &str, &str); 9] = [
    (
        "Γενικό Νοσοκομείο Αθηνών «Ιπποκράτειο»",
        "Γενική Ιατρική / General Medicine",
        "Βασ. Σοφίας 114, Αθήνα",
        "213 2088000",
        "Κέντρο Αθήνας",
    ),
    (
        "Γενικό Νοσοκομείο Αθηνών «Λαϊκό»",
        "Χειρουργική / Surgery",
        "Αγίου Θωμά 17, Γουδή",
        "213 2061000",
        "Γουδή",
    ),
    (
        "Γενικό Νοσοκομείο Αθηνών «Ο Ευαγγελισμός»",
        "Καρδιολογία / Cardiology",
        "Υψηλάντου 45-47, Αθήνα",
        "213 2041000",
        "Κολωνάκι",
    ),
    (
        "Γενικό Νοσοκομείο Αθηνών «Αλεξάνδρα»",
        "Μαιευτική - Γυναικολογία / Obstetrics - Gynecology",
        "Βασ. Σοφίας 80, Αθήνα",
        "213 3162000",
        "Κέντρο Αθήνας",
    ),
    (
        "Παίδων «Αγία Σοφία»",
        "Παιδιατρική / Pediatrics",
        "Θηβών & Παπαδιαμαντοπούλου, Γουδή",
        "213 2013000",
        "Γουδή",
    ),
    (
        "Αττικό Νοσοκομείο",
        "Ορθοπεδική / Orthopedics",
        "Ρίμινι 1, Χαϊδάρι",
        "210 5831000",
        "Χαϊδάρι",
    ),
    (
        "ΚΑΤ - Γενικό Νοσοκομείο Αττικής",
        "Τραυματολογία / Trauma",
        "Νίκης 2, Κηφισιά",
        "213 2086000",
        "Κηφισιά",
    ),
    (
        "«Σωτηρία» - Νοσοκομείο Θώρακος Αθηνών",
        "Πνευμονολογία / Pulmonology",
        "Μεσογείων 152, Αθήνα",
        "213 2057000",
        "Αμπελόκηποι",
    ),
    (
        "Ψυχιατρικό Νοσοκομείο Αττικής",
        "Ψυχιατρική / Psychiatry",
        "Ρίμινι & Χαϊδαρίου, Χαϊδάρι",
        "213 2047000",
        "Χαϊδάρι",
    ),
];

pub fn duty_records(date: NaiveDate) -> Vec<DutyRecord> {
    SAMPLE
        .iter()
        .map(|&(institution, specialty, address, phone, area)| DutyRecord {
            institution: s!(institution),
            specialty: s!(specialty),
            time_slot: TimeSlot::FullDay,
            duty_date: date,
            address: s!(address),
            phone: s!(phone),
            area: s!(area),
        })
        .collect()
}
