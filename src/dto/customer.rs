//! Views projected from a [`CustomerDetails`] aggregate for the tabbed
//! customer modal.
//!
//! Every function here is a pure projection: the aggregate is never changed
//! and the same aggregate always yields the same views.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::customer::{
    Collateral, CustomerDetails, CustomerProfile, Guarantor, Referee, image_ref,
};
use crate::dto::format::{format_currency, format_long_date};

pub const NO_REFEREES: &str = "No referees found";
pub const NO_GUARANTORS: &str = "No guarantors found";
pub const NO_IMAGES: &str = "No images found";

/// The four panels of the customer modal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailTab {
    #[default]
    Personal,
    Referees,
    Guarantors,
    Images,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Personal,
        DetailTab::Referees,
        DetailTab::Guarantors,
        DetailTab::Images,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn slug(self) -> &'static str {
        match self {
            DetailTab::Personal => "personal",
            DetailTab::Referees => "referees",
            DetailTab::Guarantors => "guarantors",
            DetailTab::Images => "images",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Personal => "Personal Details",
            DetailTab::Referees => "Referees",
            DetailTab::Guarantors => "Guarantors",
            DetailTab::Images => "Images",
        }
    }
}

impl Display for DetailTab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DetailTab {
    type Err = ();

    /// Accepts either the slug (`referees`) or the position (`1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index).ok_or(());
        }
        Self::ALL
            .into_iter()
            .find(|tab| tab.slug().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

impl DetailField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct BusinessInfo {
    pub name: String,
    pub location: Option<String>,
}

/// Customer profile laid out in two columns.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PersonalView {
    pub full_name: String,
    pub left: Vec<DetailField>,
    pub right: Vec<DetailField>,
    pub business: Option<BusinessInfo>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RefereeBlock {
    pub name: String,
    pub relationship: String,
    pub phone_number: String,
    pub id_number: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefereesView {
    Empty { placeholder: &'static str },
    Blocks { blocks: Vec<RefereeBlock> },
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CollateralLine {
    pub name: String,
    pub count: i64,
    /// Free-text details, `None` when blank.
    pub details: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GuarantorBlock {
    /// 1-based position in the server order.
    pub position: usize,
    pub name: String,
    pub relationship: String,
    pub phone_number: String,
    pub id_number: String,
    pub business_location: String,
    pub residence_details: String,
    /// `None` when the guarantor pledged no collateral.
    pub collaterals: Option<Vec<CollateralLine>>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuarantorsView {
    Empty { placeholder: &'static str },
    Blocks { blocks: Vec<GuarantorBlock> },
}

/// Labelled document image reference found in the aggregate.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ImageEntry {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DetailImage {
    pub label: String,
    pub url: String,
    /// Graphic swapped in when `url` fails to load in the browser.
    pub fallback_url: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImagesView {
    Empty { placeholder: &'static str },
    Gallery { images: Vec<DetailImage> },
}

/// One derived panel; the variant always matches the tab it was built for.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "tab", content = "view", rename_all = "snake_case")]
pub enum DetailView {
    Personal(PersonalView),
    Referees(RefereesView),
    Guarantors(GuarantorsView),
    Images(ImagesView),
}

impl DetailView {
    /// Projects the panel for `tab` from the aggregate.
    pub fn derive(tab: DetailTab, details: &CustomerDetails, image_fallback: &str) -> Self {
        match tab {
            DetailTab::Personal => DetailView::Personal(personal_view(&details.customer)),
            DetailTab::Referees => DetailView::Referees(referees_view(&details.referees)),
            DetailTab::Guarantors => DetailView::Guarantors(guarantors_view(&details.guarantors)),
            DetailTab::Images => DetailView::Images(images_view(details, image_fallback)),
        }
    }

    pub fn tab(&self) -> DetailTab {
        match self {
            DetailView::Personal(_) => DetailTab::Personal,
            DetailView::Referees(_) => DetailTab::Referees,
            DetailView::Guarantors(_) => DetailTab::Guarantors,
            DetailView::Images(_) => DetailTab::Images,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// First, optional middle and last name separated by single spaces.
pub fn full_name(customer: &CustomerProfile) -> String {
    [
        non_blank(Some(&customer.first_name)),
        non_blank(customer.middle_name.as_deref()),
        non_blank(Some(&customer.last_name)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn personal_view(customer: &CustomerProfile) -> PersonalView {
    let full_name = full_name(customer);

    let left = vec![
        DetailField::new("Full Name", full_name.clone()),
        DetailField::new("Phone", customer.phone.clone()),
        DetailField::new("National ID", customer.national_id.clone()),
        DetailField::new("Date of Birth", format_long_date(&customer.date_of_birth)),
        DetailField::new("Gender", customer.gender.clone()),
    ];

    let right = vec![
        DetailField::new("Occupation", customer.occupation.clone()),
        DetailField::new("Monthly Income", format_currency(customer.monthly_income)),
        DetailField::new("Address", customer.address.clone()),
        DetailField::new("County", customer.county.clone()),
    ];

    let business = non_blank(customer.business_name.as_deref()).map(|name| BusinessInfo {
        name: name.to_string(),
        location: non_blank(customer.business_location.as_deref()).map(str::to_string),
    });

    PersonalView {
        full_name,
        left,
        right,
        business,
    }
}

pub fn referees_view(referees: &[Referee]) -> RefereesView {
    if referees.is_empty() {
        return RefereesView::Empty {
            placeholder: NO_REFEREES,
        };
    }

    let blocks = referees
        .iter()
        .map(|referee| RefereeBlock {
            name: referee.name.clone(),
            relationship: referee.relationship.clone(),
            phone_number: referee.phone_number.clone(),
            id_number: referee.id_number.clone(),
        })
        .collect();

    RefereesView::Blocks { blocks }
}

fn collateral_line(collateral: &Collateral) -> CollateralLine {
    CollateralLine {
        name: collateral.item_name.clone(),
        count: collateral.item_count,
        details: non_blank(Some(&collateral.additional_details)).map(str::to_string),
    }
}

pub fn guarantors_view(guarantors: &[Guarantor]) -> GuarantorsView {
    if guarantors.is_empty() {
        return GuarantorsView::Empty {
            placeholder: NO_GUARANTORS,
        };
    }

    let blocks = guarantors
        .iter()
        .enumerate()
        .map(|(index, guarantor)| GuarantorBlock {
            position: index + 1,
            name: guarantor.name.clone(),
            relationship: guarantor.relationship.clone(),
            phone_number: guarantor.phone_number.clone(),
            id_number: guarantor.id_number.clone(),
            business_location: guarantor.business_location.clone(),
            residence_details: guarantor.residence_details.clone(),
            collaterals: (!guarantor.collaterals.is_empty())
                .then(|| guarantor.collaterals.iter().map(collateral_line).collect()),
        })
        .collect();

    GuarantorsView::Blocks { blocks }
}

/// Flat list of every populated image reference: the customer's passport and
/// ID photos first, then each guarantor's two photos in guarantor order.
pub fn collect_images(details: &CustomerDetails) -> Vec<ImageEntry> {
    let mut images = Vec::new();

    let mut push = |label: String, reference: &Option<String>| {
        if let Some(url) = image_ref(reference) {
            images.push(ImageEntry {
                label,
                url: url.to_string(),
            });
        }
    };

    push("Passport Photo".to_string(), &details.customer.passport_photo);
    push(
        "National ID Photo".to_string(),
        &details.customer.national_id_photo,
    );

    for (index, guarantor) in details.guarantors.iter().enumerate() {
        let position = index + 1;
        push(format!("Guarantor {position} Passport"), &guarantor.pass_photo);
        push(format!("Guarantor {position} ID"), &guarantor.id_photo);
    }

    images
}

pub fn images_view(details: &CustomerDetails, image_fallback: &str) -> ImagesView {
    let images = collect_images(details);

    if images.is_empty() {
        return ImagesView::Empty {
            placeholder: NO_IMAGES,
        };
    }

    ImagesView::Gallery {
        images: images
            .into_iter()
            .map(|entry| DetailImage {
                label: entry.label,
                url: entry.url,
                fallback_url: image_fallback.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "/assets/img/image-not-found.svg";

    fn customer() -> CustomerProfile {
        CustomerProfile {
            first_name: "Amina".to_string(),
            last_name: "Otieno".to_string(),
            phone: "0712345678".to_string(),
            national_id: "30111222".to_string(),
            occupation: "Trader".to_string(),
            monthly_income: 45000.0,
            date_of_birth: "1990-03-15".to_string(),
            gender: "female".to_string(),
            address: "Moi Avenue".to_string(),
            county: "Nairobi".to_string(),
            ..CustomerProfile::default()
        }
    }

    fn guarantor(name: &str, collaterals: Vec<Collateral>) -> Guarantor {
        Guarantor {
            name: name.to_string(),
            collaterals,
            ..Guarantor::default()
        }
    }

    fn collateral(name: &str, count: i64, details: &str) -> Collateral {
        Collateral {
            item_name: name.to_string(),
            item_count: count,
            additional_details: details.to_string(),
        }
    }

    #[test]
    fn full_name_without_middle_name_has_single_space() {
        let mut profile = customer();
        assert_eq!(full_name(&profile), "Amina Otieno");

        profile.middle_name = Some("  ".to_string());
        assert_eq!(full_name(&profile), "Amina Otieno");

        profile.middle_name = Some("Wanjiku".to_string());
        assert_eq!(full_name(&profile), "Amina Wanjiku Otieno");
    }

    #[test]
    fn personal_view_formats_income_and_birth_date() {
        let view = personal_view(&customer());

        assert_eq!(view.left[0], DetailField::new("Full Name", "Amina Otieno"));
        assert_eq!(
            view.left[3],
            DetailField::new("Date of Birth", "15 March 1990")
        );
        assert_eq!(
            view.right[1],
            DetailField::new("Monthly Income", "Ksh 45,000.00")
        );
        assert_eq!(view.business, None);
    }

    #[test]
    fn personal_view_shows_business_only_when_named() {
        let mut profile = customer();
        profile.business_location = Some("Gikomba".to_string());
        assert_eq!(personal_view(&profile).business, None);

        profile.business_name = Some("Amina Fabrics".to_string());
        assert_eq!(
            personal_view(&profile).business,
            Some(BusinessInfo {
                name: "Amina Fabrics".to_string(),
                location: Some("Gikomba".to_string()),
            })
        );
    }

    #[test]
    fn empty_referees_render_placeholder() {
        assert_eq!(
            referees_view(&[]),
            RefereesView::Empty {
                placeholder: NO_REFEREES
            }
        );
    }

    #[test]
    fn referees_keep_server_order() {
        let referees = vec![
            Referee {
                name: "Zed".to_string(),
                ..Referee::default()
            },
            Referee {
                name: "Abel".to_string(),
                ..Referee::default()
            },
        ];

        let RefereesView::Blocks { blocks } = referees_view(&referees) else {
            panic!("expected referee blocks");
        };
        let names: Vec<_> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Abel"]);
    }

    #[test]
    fn guarantors_render_collaterals_only_when_present() {
        let guarantors = vec![
            guarantor(
                "Peter",
                vec![collateral("TV", 1, "Samsung 43\""), collateral("Sofa", 2, "  ")],
            ),
            guarantor("Mary", vec![]),
        ];

        let GuarantorsView::Blocks { blocks } = guarantors_view(&guarantors) else {
            panic!("expected guarantor blocks");
        };

        assert_eq!(blocks.len(), 2);
        let lines = blocks[0].collaterals.as_ref().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].details.as_deref(), Some("Samsung 43\""));
        assert_eq!(lines[1].details, None);
        assert_eq!(blocks[1].collaterals, None);
        assert_eq!(blocks[1].position, 2);
    }

    #[test]
    fn empty_guarantors_render_placeholder() {
        assert_eq!(
            guarantors_view(&[]),
            GuarantorsView::Empty {
                placeholder: NO_GUARANTORS
            }
        );
    }

    #[test]
    fn image_list_follows_fixed_order_and_skips_absent_references() {
        let mut profile = customer();
        profile.passport_photo = Some("https://cdn/p.jpg".to_string());
        profile.national_id_photo = Some("https://cdn/id.jpg".to_string());

        let mut first = guarantor("Peter", vec![]);
        first.id_photo = Some("https://cdn/g1-id.jpg".to_string());
        let mut second = guarantor("Mary", vec![]);
        second.pass_photo = Some("https://cdn/g2-pass.jpg".to_string());
        second.id_photo = Some(String::new());

        let details = CustomerDetails {
            customer: profile,
            guarantors: vec![first, second],
            ..CustomerDetails::default()
        };

        let images = collect_images(&details);
        let labels: Vec<_> = images.iter().map(|i| i.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "Passport Photo",
                "National ID Photo",
                "Guarantor 1 ID",
                "Guarantor 2 Passport"
            ]
        );
        assert_eq!(images[2].url, "https://cdn/g1-id.jpg");
    }

    #[test]
    fn images_view_without_references_renders_placeholder() {
        let details = CustomerDetails {
            customer: customer(),
            guarantors: vec![guarantor("Peter", vec![])],
            ..CustomerDetails::default()
        };

        assert_eq!(
            images_view(&details, FALLBACK),
            ImagesView::Empty {
                placeholder: NO_IMAGES
            }
        );
    }

    #[test]
    fn every_gallery_image_carries_its_own_fallback() {
        let mut profile = customer();
        profile.passport_photo = Some("https://cdn/p.jpg".to_string());
        let details = CustomerDetails {
            customer: profile,
            ..CustomerDetails::default()
        };

        let ImagesView::Gallery { images } = images_view(&details, FALLBACK) else {
            panic!("expected gallery");
        };
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].fallback_url, FALLBACK);
    }

    #[test]
    fn tabs_parse_from_slug_or_index() {
        assert_eq!("referees".parse::<DetailTab>(), Ok(DetailTab::Referees));
        assert_eq!("IMAGES".parse::<DetailTab>(), Ok(DetailTab::Images));
        assert_eq!("2".parse::<DetailTab>(), Ok(DetailTab::Guarantors));
        assert_eq!("4".parse::<DetailTab>(), Err(()));
        assert_eq!("history".parse::<DetailTab>(), Err(()));
    }

    #[test]
    fn derived_view_matches_requested_tab() {
        let details = CustomerDetails {
            customer: customer(),
            ..CustomerDetails::default()
        };

        for tab in DetailTab::ALL {
            assert_eq!(DetailView::derive(tab, &details, FALLBACK).tab(), tab);
        }
    }
}
