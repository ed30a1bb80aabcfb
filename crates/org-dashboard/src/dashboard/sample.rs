use super::dataset::{Dataset, DatasetIntegrityError, RawProjectRow};

/// Fixed sample used by the dashboard until real ingestion exists.
pub const SAMPLE_PROJECTS: [RawProjectRow; 16] = [
    RawProjectRow {
        department: "فناوری اطلاعات",
        manager: "علی رضایی",
        project_name: "راه‌اندازی پلتفرم ابری داخلی",
        start_date: "2025-01-15",
        status: "در حال انجام",
        score: 89,
    },
    RawProjectRow {
        department: "فناوری اطلاعات",
        manager: "علی رضایی",
        project_name: "اتوماسیون فرایندهای اداری",
        start_date: "2025-03-02",
        status: "در حال انجام",
        score: 92,
    },
    RawProjectRow {
        department: "فناوری اطلاعات",
        manager: "مریم کریمی",
        project_name: "به‌روزرسانی زیرساخت شبکه",
        start_date: "2024-11-20",
        status: "نزدیک به اتمام",
        score: 85,
    },
    RawProjectRow {
        department: "فناوری اطلاعات",
        manager: "مریم کریمی",
        project_name: "پیاده‌سازی سیستم مانیتورینگ",
        start_date: "2025-02-10",
        status: "در حال انجام",
        score: 81,
    },
    RawProjectRow {
        department: "مالی",
        manager: "حسین موسوی",
        project_name: "سیستم مدیریت بودجه",
        start_date: "2025-01-05",
        status: "در حال انجام",
        score: 78,
    },
    RawProjectRow {
        department: "مالی",
        manager: "حسین موسوی",
        project_name: "دیجیتالی‌سازی اسناد مالی",
        start_date: "2024-12-10",
        status: "در حال انجام",
        score: 83,
    },
    RawProjectRow {
        department: "مالی",
        manager: "نگار احمدی",
        project_name: "بازطراحی ساختار گزارش‌دهی مالی",
        start_date: "2025-03-12",
        status: "در حال انجام",
        score: 80,
    },
    RawProjectRow {
        department: "منابع انسانی",
        manager: "سارا محمدی",
        project_name: "پیاده‌سازی سیستم ارزیابی عملکرد",
        start_date: "2025-01-25",
        status: "در حال انجام",
        score: 90,
    },
    RawProjectRow {
        department: "منابع انسانی",
        manager: "سارا محمدی",
        project_name: "برنامه توسعه مهارت مدیران",
        start_date: "2025-02-18",
        status: "در حال انجام",
        score: 88,
    },
    RawProjectRow {
        department: "منابع انسانی",
        manager: "مجتبی نوری",
        project_name: "سیستم جذب و استخدام آنلاین",
        start_date: "2024-12-01",
        status: "نزدیک به اتمام",
        score: 86,
    },
    RawProjectRow {
        department: "بازاریابی",
        manager: "الهام صادقی",
        project_name: "کمپین دیجیتال برندینگ",
        start_date: "2025-01-10",
        status: "در حال انجام",
        score: 91,
    },
    RawProjectRow {
        department: "بازاریابی",
        manager: "الهام صادقی",
        project_name: "تحلیل رفتار مشتریان",
        start_date: "2025-02-05",
        status: "در حال انجام",
        score: 87,
    },
    RawProjectRow {
        department: "بازاریابی",
        manager: "امیر تقوی",
        project_name: "طراحی باشگاه مشتریان",
        start_date: "2024-11-30",
        status: "در حال انجام",
        score: 84,
    },
    RawProjectRow {
        department: "تحقیق و توسعه",
        manager: "رضا کاظمی",
        project_name: "پروژه هوش مصنوعی پیش‌بینی فروش",
        start_date: "2025-01-20",
        status: "در حال انجام",
        score: 94,
    },
    RawProjectRow {
        department: "تحقیق و توسعه",
        manager: "رضا کاظمی",
        project_name: "تحقیق بازار محصولات جدید",
        start_date: "2025-03-01",
        status: "در حال انجام",
        score: 89,
    },
    RawProjectRow {
        department: "تحقیق و توسعه",
        manager: "نسیم رستگار",
        project_name: "آزمایش نمونه اولیه محصول",
        start_date: "2024-12-15",
        status: "نزدیک به اتمام",
        score: 88,
    },
];

impl Dataset {
    pub fn sample() -> Result<Self, DatasetIntegrityError> {
        Self::from_raw(&SAMPLE_PROJECTS)
    }
}
