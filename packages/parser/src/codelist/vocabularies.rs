//! Built-in IATI vocabularies.
//!
//! Small vocabularies are complete. Currency, country, region, sector,
//! finance-type and aid-type carry the members seen most often in
//! published data; inject a [`CodelistTable`](super::CodelistTable) built
//! from the published lists when complete coverage is needed.

use super::Codelist;

/// Declare a closed vocabulary enum with its codes and labels.
macro_rules! codelist {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($code:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl Codelist for $name {
            const NAME: &'static str = stringify!($name);

            fn code(self) -> &'static str {
                match self {
                    $( Self::$variant => $code ),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }

            fn all() -> &'static [Self] {
                &[ $( Self::$variant ),+ ]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }
    };
}

codelist! {
    /// Kind of organisation (reporting, participating, provider, receiver).
    OrganisationType {
        Government => ("10", "Government"),
        OtherPublicSector => ("15", "Other Public Sector"),
        InternationalNgo => ("21", "International NGO"),
        NationalNgo => ("22", "National NGO"),
        RegionalNgo => ("23", "Regional NGO"),
        PartnerCountryNgo => ("24", "Partner Country based NGO"),
        PublicPrivatePartnership => ("30", "Public Private Partnership"),
        Multilateral => ("40", "Multilateral"),
        Foundation => ("60", "Foundation"),
        PrivateSector => ("70", "Private Sector"),
        PrivateSectorProviderCountry => ("71", "Private Sector in Provider Country"),
        PrivateSectorRecipientCountry => ("72", "Private Sector in Aid Recipient Country"),
        PrivateSectorThirdCountry => ("73", "Private Sector in Third Country"),
        Academic => ("80", "Academic, Training and Research"),
        Other => ("90", "Other"),
    }
}

codelist! {
    /// Role an organisation plays in an activity.
    OrganisationRole {
        Funding => ("1", "Funding"),
        Accountable => ("2", "Accountable"),
        Extending => ("3", "Extending"),
        Implementing => ("4", "Implementing"),
    }
}

codelist! {
    /// Kind of financial movement.
    TransactionType {
        Commitment => ("C", "Commitment"),
        Disbursement => ("D", "Disbursement"),
        Expenditure => ("E", "Expenditure"),
        IncomingFunds => ("IF", "Incoming Funds"),
        InterestRepayment => ("IR", "Interest Repayment"),
        LoanRepayment => ("LR", "Loan Repayment"),
        Reimbursement => ("R", "Reimbursement"),
        PurchaseOfEquity => ("QP", "Purchase of Equity"),
        SaleOfEquity => ("QS", "Sale of Equity"),
        CreditGuarantee => ("CG", "Credit Guarantee"),
        IncomingCommitment => ("IC", "Incoming Commitment"),
    }
}

codelist! {
    /// Whether a budget is the original or a revised figure.
    BudgetType {
        Original => ("1", "Original"),
        Revised => ("2", "Revised"),
    }
}

codelist! {
    /// Milestone carried by an `activity-date` element.
    ActivityDateType {
        StartPlanned => ("start-planned", "Planned start"),
        StartActual => ("start-actual", "Actual start"),
        EndPlanned => ("end-planned", "Planned end"),
        EndActual => ("end-actual", "Actual end"),
    }
}

codelist! {
    /// Lifecycle stage of an activity.
    ActivityStatus {
        Pipeline => ("1", "Pipeline/identification"),
        Implementation => ("2", "Implementation"),
        Completion => ("3", "Completion"),
        PostCompletion => ("4", "Post-completion"),
        Cancelled => ("5", "Cancelled"),
        Suspended => ("6", "Suspended"),
    }
}

codelist! {
    /// ISO 4217 currency.
    Currency {
        AustralianDollar => ("AUD", "Australian Dollar"),
        ArmenianDram => ("AMD", "Armenian Dram"),
        BangladeshTaka => ("BDT", "Taka"),
        CanadianDollar => ("CAD", "Canadian Dollar"),
        SwissFranc => ("CHF", "Swiss Franc"),
        DanishKrone => ("DKK", "Danish Krone"),
        EthiopianBirr => ("ETB", "Ethiopian Birr"),
        Euro => ("EUR", "Euro"),
        PoundSterling => ("GBP", "Pound Sterling"),
        IndianRupee => ("INR", "Indian Rupee"),
        Yen => ("JPY", "Yen"),
        KenyanShilling => ("KES", "Kenyan Shilling"),
        NorwegianKrone => ("NOK", "Norwegian Krone"),
        NewZealandDollar => ("NZD", "New Zealand Dollar"),
        SwedishKrona => ("SEK", "Swedish Krona"),
        TanzanianShilling => ("TZS", "Tanzanian Shilling"),
        UgandaShilling => ("UGX", "Uganda Shilling"),
        UsDollar => ("USD", "US Dollar"),
        CfaFrancBeac => ("XAF", "CFA Franc BEAC"),
        CfaFrancBceao => ("XOF", "CFA Franc BCEAO"),
        Rand => ("ZAR", "Rand"),
    }
}

codelist! {
    /// ISO 3166-1 alpha-2 country.
    Country {
        Afghanistan => ("AF", "Afghanistan"),
        Armenia => ("AM", "Armenia"),
        Bangladesh => ("BD", "Bangladesh"),
        CongoDemocraticRepublic => ("CD", "Congo, The Democratic Republic of the"),
        Ethiopia => ("ET", "Ethiopia"),
        UnitedKingdom => ("GB", "United Kingdom"),
        Ghana => ("GH", "Ghana"),
        Haiti => ("HT", "Haiti"),
        India => ("IN", "India"),
        Japan => ("JP", "Japan"),
        Kenya => ("KE", "Kenya"),
        Malawi => ("MW", "Malawi"),
        Mozambique => ("MZ", "Mozambique"),
        Nigeria => ("NG", "Nigeria"),
        Nepal => ("NP", "Nepal"),
        Pakistan => ("PK", "Pakistan"),
        Rwanda => ("RW", "Rwanda"),
        Sudan => ("SD", "Sudan"),
        Somalia => ("SO", "Somalia"),
        SouthSudan => ("SS", "South Sudan"),
        Tanzania => ("TZ", "Tanzania, United Republic of"),
        Uganda => ("UG", "Uganda"),
        UnitedStates => ("US", "United States"),
        Zambia => ("ZM", "Zambia"),
        Zimbabwe => ("ZW", "Zimbabwe"),
    }
}

codelist! {
    /// OECD DAC supranational region.
    Region {
        EuropeRegional => ("89", "Europe, regional"),
        NorthOfSaharaRegional => ("189", "North of Sahara, regional"),
        SouthOfSaharaRegional => ("289", "South of Sahara, regional"),
        AfricaRegional => ("298", "Africa, regional"),
        WestIndiesRegional => ("380", "West Indies, regional"),
        NorthAndCentralAmericaRegional => ("389", "North and Central America, regional"),
        SouthAmericaRegional => ("489", "South America, regional"),
        AmericaRegional => ("498", "America, regional"),
        MiddleEastRegional => ("589", "Middle East, regional"),
        CentralAsiaRegional => ("619", "Central Asia, regional"),
        SouthAsiaRegional => ("679", "South Asia, regional"),
        SouthAndCentralAsiaRegional => ("689", "South and Central Asia, regional"),
        FarEastAsiaRegional => ("789", "Far East Asia, regional"),
        AsiaRegional => ("798", "Asia, regional"),
        OceaniaRegional => ("889", "Oceania, regional"),
        BilateralUnspecified => ("998", "Bilateral, unspecified"),
    }
}

codelist! {
    /// OECD DAC 5-digit purpose code.
    Sector {
        EducationPolicy => ("11110", "Education policy and administrative management"),
        PrimaryEducation => ("11220", "Primary education"),
        HealthPolicy => ("12110", "Health policy and administrative management"),
        BasicHealthCare => ("12220", "Basic health care"),
        HealthEducation => ("12261", "Health education"),
        ReproductiveHealthCare => ("13020", "Reproductive health care"),
        StdControlIncludingHivAids => ("13040", "STD control including HIV/AIDS"),
        BasicDrinkingWaterAndSanitation => ("14030", "Basic drinking water supply and basic sanitation"),
        PublicSectorPolicy => ("15110", "Public sector policy and administrative management"),
        DemocraticParticipation => ("15150", "Democratic participation and civil society"),
        HumanRights => ("15160", "Human rights"),
        SocialWelfareServices => ("16010", "Social/ welfare services"),
        AgriculturalPolicy => ("31110", "Agricultural policy and administrative management"),
        FoodCropProduction => ("31161", "Food crop production"),
        RuralDevelopment => ("43040", "Rural development"),
        MaterialReliefAssistance => ("72010", "Material relief assistance and services"),
        EmergencyFoodAid => ("72040", "Emergency food aid"),
        SectorsNotSpecified => ("99810", "Sectors not specified"),
    }
}

codelist! {
    /// Classification of the flow of funds.
    FlowType {
        Oda => ("10", "ODA"),
        Oof => ("20", "OOF"),
        PrivateNgo => ("30", "Private NGO and other private sources"),
        PrivateMarket => ("35", "Private Market"),
        NonFlow => ("40", "Non flow"),
        OtherFlows => ("50", "Other flows"),
    }
}

codelist! {
    /// Financial instrument used for a transaction.
    FinanceType {
        AidGrant => ("110", "Aid grant excluding debt reorganisation"),
        SubsidiesToPrivateInvestors => ("111", "Subsidies to national private investors"),
        InterestSubsidyGrant => ("210", "Interest subsidy grant in AF"),
        InterestSubsidyToExporters => ("211", "Interest subsidy to national private exporters"),
        DepositBasis => ("310", "Deposit basis"),
        EncashmentBasis => ("311", "Encashment basis"),
        AidLoan => ("410", "Aid loan excluding debt reorganisation"),
        InvestmentRelatedLoan => ("411", "Investment-related loan to developing countries"),
        JointVentureLoan => ("412", "Loan in a joint venture with the recipient"),
        LoanToPrivateInvestor => ("413", "Loan to national private investor"),
        LoanToPrivateExporter => ("414", "Loan to national private exporter"),
        DirectInvestment => ("510", "Acquisition of equity as part of a joint venture with the recipient"),
        OtherEquity => ("520", "Other acquisition of equity"),
        DebtForgiveness => ("610", "Debt forgiveness: ODA claims (P)"),
    }
}

codelist! {
    /// Type of aid being supplied.
    AidType {
        GeneralBudgetSupport => ("A01", "General budget support"),
        SectorBudgetSupport => ("A02", "Sector budget support"),
        CoreSupportToNgos => ("B01", "Core support to NGOs, other private bodies, PPPs and research institutes"),
        CoreContributionsToMultilaterals => ("B02", "Core contributions to multilateral institutions"),
        SpecificPurposeProgrammes => ("B03", "Contributions to specific-purpose programmes and funds managed by international organisations"),
        BasketFunds => ("B04", "Basket funds/pooled funding"),
        ProjectTypeInterventions => ("C01", "Project-type interventions"),
        DonorCountryPersonnel => ("D01", "Donor country personnel"),
        OtherTechnicalAssistance => ("D02", "Other technical assistance"),
        ScholarshipsInDonorCountry => ("E01", "Scholarships/training in donor country"),
        ImputedStudentCosts => ("E02", "Imputed student costs"),
        DebtRelief => ("F01", "Debt relief"),
        AdministrativeCosts => ("G01", "Administrative costs not included elsewhere"),
        DevelopmentAwareness => ("H01", "Development awareness"),
        RefugeesInDonorCountries => ("H02", "Refugees in donor countries"),
    }
}

codelist! {
    /// Whether aid is tied to procurement from the donor.
    TiedStatus {
        PartiallyTied => ("3", "Partially tied"),
        Tied => ("4", "Tied"),
        Untied => ("5", "Untied"),
    }
}

codelist! {
    /// How funds reach the implementing institution.
    DisbursementChannel {
        MinistryOfFinance => ("1", "Money is disbursed through central Ministry of Finance or Treasury"),
        DirectToInstitution => ("2", "Money is disbursed directly to the implementing institution and managed through a separate bank account"),
        AidInKind => ("3", "Aid in kind: Donors manage funds themselves"),
        NotReported => ("4", "Not reported"),
    }
}
