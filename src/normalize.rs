// src/normalize.rs
//! Lookup tables for institutions, specialties, months and weekdays.
//!
//! Built once ([`NormalizationTables::builtin`]) and shared by reference;
//! nothing here mutates after construction. Institution and specialty
//! lookups are total: an unknown token comes back cleaned but otherwise
//! unchanged. Month lookup is the one place a miss is reported (`None`),
//! because month inference depends on it.

use std::collections::HashMap;

use chrono::Weekday;

use crate::core::greek::{fold, tokens};
use crate::core::sanitize::{normalize_ws, strip_markers};

/// Abbreviation as printed in the duty tables → canonical institution name.
const INSTITUTIONS: &[(&str, &str)] = &[
    ("ΕΥΑΓΓΕΛΙΣΜΟΣ", "Γενικό Νοσοκομείο Αθηνών «Ο Ευαγγελισμός»"),
    ("ΛΑΪΚΟ", "Γενικό Νοσοκομείο Αθηνών «Λαϊκό»"),
    ("ΕΛΠΙΣ", "Γενικό Νοσοκομείο Αθηνών «Ελπίς»"),
    ("ΑΓ. ΑΝΑΡΓΥΡΟΙ", "Γενικό Οικουμενικό Νοσοκομείο Κρατικό «Άγιοι Ανάργυροι»"),
    ("ΣΙΣΜΑΝΟΓΛΕΙΟ", "Γενικό Νοσοκομείο Αθηνών «Σισμανόγλειο»"),
    ("ΠΑΜΜΑΚΑΡΙΣΤΟΣ", "Γενικό Νοσοκομείο Αθηνών «Παμμακάριστος»"),
    ("ΑΤΤΙΚΟΝ", "Πανεπιστημιακό Γενικό Νοσοκομείο «Αττικόν»"),
    ("ΚΑΤ", "Γενικό Νοσοκομείο Αθηνών «ΚΑΤ»"),
    ("ΑΣΚΛΗΠΙΕΙΟ", "Γενικό Νοσοκομείο «Ασκληπιείο» Βούλας"),
    ("ΚΩΝ/ΠΟΥΛΕΙΟ", "Γενικό Νοσοκομείο Νέας Ιωνίας «Κωνσταντοπούλειο»"),
    ("ΠΕΙΡΑΙΑΣ", "Γενικό Νοσοκομείο Πειραιώς «Τζάνειο»"),
    ("ΑΛΕΞΑΝΔΡΑ", "Γενικό Νοσοκομείο Αθηνών «Αλεξάνδρα»"),
    ("ΑΡΕΤΑΙΕΙΟ", "Γενικό Νοσοκομείο Αθηνών «Αρεταίειο»"),
    ("ΕΛ. ΒΕΝΙΖΕΛΟΥ", "Γενικό Μαιευτικό «Ελένα Βενιζέλου»"),
    ("ΠΕΝΤΕΛΗΣ", "Γενικό Νοσοκομείο Παίδων «Πεντέλης»"),
    ("ΑΓΛ. ΚΥΡΙΑΚΟΥ", "Γενικό Νοσοκομείο Παίδων Αττικής «Αγλαΐα Κυριακού»"),
    ("ΣΩΤΗΡΙΑ", "Νοσοκομείο Θώρακος Αθηνών «Σωτηρία»"),
    ("ΙΠΠΟΚΡΑΤΕΙΟ", "Γενικό Νοσοκομείο Αθηνών «Ιπποκράτειο»"),
    ("ΔΡΟΜΟΚΑΪΤΕΙΟ", "Ψυχιατρικό Νοσοκομείο Αττικής «Δρομοκαΐτειο»"),
    ("Α. ΣΥΓΓΡΟΣ", "Νοσηλευτικό Δερματολογικό Νοσοκομείο Αθηνών «Ανδρέας Συγγρός»"),
    ("ΟΦΘΑΛΜΙΑΤΡΕΙΟ", "Νοσηλευτικό Οφθαλμιατρείο Αθηνών"),
    ("ΑΓ. ΣΑΒΒΑΣ", "Αντικαρκινικό-Ογκολογικό Νοσοκομείο Αθηνών «Άγιος Σάββας»"),
    ("Γ. ΓΕΝΝΗΜΑΤΑΣ", "Γενικό Νοσοκομείο Αθηνών «Γεώργιος Γεννηματάς»"),
    ("ΚΟΡΓ. ΜΠΕΝ. ΕΕΣ", "Γενικό Νοσοκομείο Αθηνών «Κοργιαλένειο-Μπενάκειο Ε.Ε.Σ.»"),
];

/// Specialty token as printed → (Greek label, English label).
const SPECIALTIES: &[(&str, &str, &str)] = &[
    ("Παθολογική", "Παθολογία", "Internal Medicine"),
    ("Καρδιολογική", "Καρδιολογία", "Cardiology"),
    ("Χειρουργική", "Χειρουργική", "Surgery"),
    ("Αγγειοχειρ/κή", "Αγγειοχειρουργική", "Vascular Surgery"),
    ("Αιματολογική", "Αιματολογία", "Hematology"),
    ("Γαστρεντερ/γική", "Γαστρεντερολογία", "Gastroenterology"),
    ("Γναθοχειρουργική", "Γναθοχειρουργική", "Maxillofacial Surgery"),
    ("Δερματολογική", "Δερματολογία", "Dermatology"),
    ("Ενδοκρινολογική", "Ενδοκρινολογία", "Endocrinology"),
    ("Θωρακοχειρ/γική", "Θωρακοχειρουργική", "Thoracic Surgery"),
    ("Καρδιοχειρ/κή", "Καρδιοχειρουργική", "Cardiac Surgery"),
    ("Νευρολογική", "Νευρολογία", "Neurology"),
    ("Νευροχειρουργική", "Νευροχειρουργική", "Neurosurgery"),
    ("Νεφρολογική", "Νεφρολογία", "Nephrology"),
    ("Ογκολογική", "Ογκολογία", "Oncology"),
    ("Οδοντιατρική", "Οδοντιατρική", "Dentistry"),
    ("Ορθοπαιδική", "Ορθοπεδική", "Orthopedics"),
    ("Ουρολογική", "Ουρολογία", "Urology"),
    ("Οφθαλμολογική", "Οφθαλμολογία", "Ophthalmology"),
    ("Πνευμονολογική", "Πνευμονολογία", "Pulmonology"),
    ("Πλαστ. Χειρουργική", "Πλαστική Χειρουργική", "Plastic Surgery"),
    ("Ρευματολογική", "Ρευματολογία", "Rheumatology"),
    ("Ψυχιατρική", "Ψυχιατρική", "Psychiatry"),
    ("Ω.Ρ.Λ.", "Ωτορινολαρυγγολογία", "ENT"),
    ("Γυναικολογική", "Γυναικολογία", "Gynecology"),
    ("Μαιευτική", "Μαιευτική", "Obstetrics"),
    ("Παιδιατρικό", "Παιδιατρική", "Pediatrics"),
    ("Παιδοψυχιατρική", "Παιδοψυχιατρική", "Child Psychiatry"),
];

/// (nominative, genitive), January first.
const MONTHS: [(&str, &str); 12] = [
    ("Ιανουάριος", "Ιανουαρίου"),
    ("Φεβρουάριος", "Φεβρουαρίου"),
    ("Μάρτιος", "Μαρτίου"),
    ("Απρίλιος", "Απριλίου"),
    ("Μάιος", "Μαΐου"),
    ("Ιούνιος", "Ιουνίου"),
    ("Ιούλιος", "Ιουλίου"),
    ("Αύγουστος", "Αυγούστου"),
    ("Σεπτέμβριος", "Σεπτεμβρίου"),
    ("Οκτώβριος", "Οκτωβρίου"),
    ("Νοέμβριος", "Νοεμβρίου"),
    ("Δεκέμβριος", "Δεκεμβρίου"),
];

/// Monday first, matching `Weekday::num_days_from_monday`.
const WEEKDAYS: [&str; 7] = [
    "Δευτέρα", "Τρίτη", "Τετάρτη", "Πέμπτη", "Παρασκευή", "Σάββατο", "Κυριακή",
];

/// Prefix and substring matches need at least this many letters.
const MIN_PARTIAL_LEN: usize = 5;

struct Institution {
    key: String,
    tokens: Vec<String>,
    canonical: &'static str,
    canonical_key: String,
}

struct Specialty {
    raw: &'static str,
    key: String,
    /// Folded key cut at the first abbreviation mark (`/` or `.`).
    stem: String,
    greek_key: String,
    label: String,
}

pub struct NormalizationTables {
    institutions: Vec<Institution>,
    specialties: Vec<Specialty>,
    months: HashMap<String, u32>,
}

impl NormalizationTables {
    pub fn builtin() -> Self {
        let mut institutions: Vec<Institution> = INSTITUTIONS
            .iter()
            .map(|&(abbr, canonical)| Institution {
                key: fold(abbr),
                tokens: tokens(abbr),
                canonical,
                canonical_key: fold(canonical),
            })
            .collect();
        // Longest abbreviation first so "ΑΓ. ΣΑΒΒΑΣ" beats any shorter overlap.
        institutions.sort_by(|a, b| b.key.chars().count().cmp(&a.key.chars().count()));

        let specialties = SPECIALTIES
            .iter()
            .map(|&(raw, greek, english)| {
                let key = fold(raw);
                let stem = key
                    .split(['/', '.'])
                    .next()
                    .unwrap_or(&key)
                    .trim()
                    .to_string();
                Specialty {
                    raw,
                    stem,
                    key,
                    greek_key: fold(greek),
                    label: join!(greek, " / ", english),
                }
            })
            .collect();

        let mut months = HashMap::new();
        for (i, (nominative, genitive)) in MONTHS.iter().enumerate() {
            let n = i as u32 + 1;
            months.insert(fold(nominative), n);
            months.insert(fold(genitive), n);
        }

        Self { institutions, specialties, months }
    }

    /// Canonical institution name for a raw table entry. Never fails.
    pub fn institution(&self, raw: &str) -> String {
        let cleaned = strip_markers(raw);
        let folded = fold(&cleaned);
        if folded.is_empty() {
            return cleaned;
        }

        if let Some(hit) = self
            .institutions
            .iter()
            .find(|i| i.key == folded || i.canonical_key == folded)
        {
            return s!(hit.canonical);
        }

        // "Γ.Ν. ΛΑΪΚΟ", "ΚΑΤ (ΚΗΦΙΣΙΑ)" and friends: the abbreviation as a
        // whole-token run inside the text.
        let toks = tokens(&cleaned);
        for inst in &self.institutions {
            if contains_run(&toks, &inst.tokens) {
                return s!(inst.canonical);
            }
        }

        cleaned
    }

    /// Bilingual `"<Greek> / <English>"` label, or the raw token if unknown.
    pub fn specialty(&self, raw: &str) -> String {
        let cleaned = normalize_ws(raw);
        if let Some(hit) = self.specialties.iter().find(|s| s.raw == cleaned) {
            return hit.label.clone();
        }

        let folded = fold(&cleaned);
        if folded.is_empty() {
            return cleaned;
        }
        if let Some(hit) = self
            .specialties
            .iter()
            .find(|s| s.key == folded || s.greek_key == folded || fold(&s.label) == folded)
        {
            return hit.label.clone();
        }

        if folded.chars().count() >= MIN_PARTIAL_LEN {
            let prefix = self.longest_stem(|s| {
                folded.starts_with(&s.stem) || s.greek_key.starts_with(&folded)
            });
            // Inside the text only at a word start, so "Παιδοχειρουργική"
            // is not read as "Χειρουργική".
            let toks = tokens(&cleaned);
            let inner = || self.longest_stem(|s| toks.iter().any(|t| t.starts_with(&s.stem)));
            if let Some(label) = prefix.or_else(inner) {
                return label;
            }
        }

        cleaned
    }

    fn longest_stem(&self, pred: impl Fn(&Specialty) -> bool) -> Option<String> {
        self.specialties
            .iter()
            .filter(|s| s.stem.chars().count() >= MIN_PARTIAL_LEN && pred(s))
            .max_by_key(|s| s.stem.chars().count())
            .map(|s| s.label.clone())
    }

    /// Month number for a nominative or genitive Greek month name.
    pub fn month_number(&self, name: &str) -> Option<u32> {
        self.months.get(&fold(name.trim())).copied()
    }

    /// Distinct months named anywhere in `text`, in order of appearance.
    pub fn months_in(&self, text: &str) -> Vec<u32> {
        let mut found = Vec::new();
        for tok in tokens(text) {
            if let Some(&m) = self.months.get(&tok) {
                if !found.contains(&m) {
                    found.push(m);
                }
            }
        }
        found
    }
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// "Οκτωβρίου" for 10.
pub fn genitive_month(month: u32) -> Option<&'static str> {
    let idx = month.checked_sub(1)? as usize;
    MONTHS.get(idx).map(|(_, genitive)| *genitive)
}

pub fn nominative_month(month: u32) -> Option<&'static str> {
    let idx = month.checked_sub(1)? as usize;
    MONTHS.get(idx).map(|(nom, _)| *nom)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}
