//! Static UI strings for the three site languages.
//!
//! Lookups never fail: a key missing from the active table falls back to the
//! key itself so a gap shows up on the page instead of breaking rendering.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ru")]
    Ru,
    #[serde(rename = "uz")]
    Uz,
    #[serde(rename = "uz-cy")]
    UzCyrl,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ru, Language::Uz, Language::UzCyrl];

    /// Code used in `data-lang` attributes and config files.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Uz => "uz",
            Language::UzCyrl => "uz-cy",
        }
    }

    /// BCP 47 tag for the document `lang` attribute.
    pub fn html_lang(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Uz => "uz-Latn",
            Language::UzCyrl => "uz-Cyrl",
        }
    }

    /// Switcher button label.
    pub fn label(self) -> &'static str {
        match self {
            Language::Ru => "RU",
            Language::Uz => "UZ",
            Language::UzCyrl => "ЎЗ",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => Some(Language::Ru),
            "uz" | "uz-latn" => Some(Language::Uz),
            "uz-cy" | "uz-cyrl" => Some(Language::UzCyrl),
            _ => None,
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::Ru => RU,
            Language::Uz => UZ,
            Language::UzCyrl => UZ_CYRL,
        }
    }
}

/// Looks up `key` in the table for `lang`, returning the key itself when absent.
pub fn translate<'a>(lang: Language, key: &'a str) -> &'a str {
    match lang.table().iter().find(|(k, _)| *k == key) {
        Some((_, text)) => *text,
        None => {
            tracing::debug!(lang = lang.code(), key, "missing translation");
            key
        }
    }
}

pub fn has_key(lang: Language, key: &str) -> bool {
    lang.table().iter().any(|(k, _)| *k == key)
}

/// Every key known to the default table.
pub fn keys() -> impl Iterator<Item = &'static str> {
    RU.iter().map(|(k, _)| *k)
}

const RU: &[(&str, &str)] = &[
    ("nav_works", "Работы"),
    ("nav_services", "Услуги"),
    ("nav_about", "О нас"),
    ("nav_contact", "Контакты"),
    ("hero_subtitle", "Premium IT & 3D Studio"),
    ("hero_title", "Создаем цифровые решения нового поколения"),
    ("hero_scroll", "Листайте"),
    ("btn_portfolio", "Смотреть работы"),
    ("btn_contact", "Связаться с нами"),
    ("about_title", "О студии"),
    ("about_desc", "Разрабатываем веб-приложения, мобильные приложения, 3D визуализацию и CRM системы для бизнеса в Узбекистане и за его пределами."),
    ("about_team_title", "Команда, которая доводит до результата"),
    ("about_team_desc", "Дизайнеры, инженеры и 3D-художники работают в одной команде: от идеи и прототипа до запуска и поддержки продукта."),
    ("about_highlight_1_title", "Продуктовый подход"),
    ("about_highlight_1_desc", "Начинаем с целей бизнеса и метрик, а не с технологий."),
    ("about_highlight_2_title", "Современный стек"),
    ("about_highlight_2_desc", "Быстрые, безопасные и масштабируемые решения."),
    ("about_highlight_3_title", "Прозрачность"),
    ("about_highlight_3_desc", "Понятные сроки, регулярные демо и открытая коммуникация."),
    ("about_metric_1_label", "Лет опыта"),
    ("about_metric_1_note", "на рынке с 2019 года"),
    ("about_metric_2_label", "Проектов"),
    ("about_metric_2_note", "для клиентов из разных отраслей"),
    ("about_metric_3_label", "Поддержка"),
    ("about_metric_3_value", "24/7"),
    ("about_metric_3_note", "сопровождение после запуска"),
    ("works_title", "Наши работы"),
    ("works_description", "Проекты, которыми мы гордимся"),
    ("project_1_title", "Fruit Exim"),
    ("project_1_desc", "Интернет-магазин свежих фруктов с каталогом и оформлением заказов."),
    ("project_2_title", "DressHub"),
    ("project_2_desc", "Маркетплейс одежды с фильтрами, корзиной и личным кабинетом."),
    ("project_3_title", "Chester Frontline"),
    ("project_3_desc", "Корпоративный сайт компании с презентацией услуг."),
    ("project_4_title", "Future Engineers"),
    ("project_4_desc", "Образовательная платформа для подготовки инженеров."),
    ("project_5_title", "Training Academy"),
    ("project_5_desc", "Платформа профессиональных курсов и тренингов."),
    ("project_6_title", "DalayOnGini"),
    ("project_6_desc", "Портфолио креативного агентства."),
    ("project_type_website", "Веб-сайт"),
    ("project_type_app", "Приложение"),
    ("project_type_3d", "3D"),
    ("project_type_crm", "CRM"),
    ("project_type_server", "Сервер"),
    ("project_type_elearning", "Онлайн-обучение"),
    ("services_title", "Услуги"),
    ("services_description", "Полный цикл разработки цифровых продуктов"),
    ("service_1_title", "Веб-разработка"),
    ("service_1_desc", "Современные, масштабируемые веб-приложения."),
    ("service_2_title", "Мобильные приложения"),
    ("service_2_desc", "Нативные и кроссплатформенные приложения для iOS и Android."),
    ("service_3_title", "3D визуализация"),
    ("service_3_desc", "Потрясающая 3D графика и интерактивные решения."),
    ("service_4_title", "CRM системы"),
    ("service_4_desc", "Индивидуальные CRM системы и серверная инфраструктура."),
    ("service_5_title", "Автоматизация бизнеса"),
    ("service_5_desc", "Интеграции и автоматизация рутинных процессов."),
    ("service_6_title", "IT-консалтинг"),
    ("service_6_desc", "Аудит, архитектура и техническая поддержка."),
    ("contact_title", "Контакты"),
    ("contact_tagline", "Готовы создать что-то великое? Свяжитесь с нами."),
    ("contact_phone", "Телефон"),
    ("contact_email", "Почта"),
    ("contact_telegram", "Telegram"),
    ("footer_description", "Premium IT & 3D студия в Ташкенте."),
    ("footer_quick_links", "Навигация"),
    ("footer_services", "Услуги"),
    ("footer_contact_us", "Свяжитесь с нами"),
    ("footer_follow_us", "Мы в соцсетях"),
    ("footer_copyright", "© 2019 ShoShiy Studio"),
    ("footer_all_rights", "Все права защищены."),
];

const UZ: &[(&str, &str)] = &[
    ("nav_works", "Ishlar"),
    ("nav_services", "Xizmatlar"),
    ("nav_about", "Biz haqimizda"),
    ("nav_contact", "Aloqa"),
    ("hero_subtitle", "Premium IT & 3D Studio"),
    ("hero_title", "Yangi avlod raqamli yechimlarini yaratamiz"),
    ("hero_scroll", "Pastga"),
    ("btn_portfolio", "Ishlarni ko'rish"),
    ("btn_contact", "Biz bilan bog'lanish"),
    ("about_title", "Studiya haqida"),
    ("about_desc", "O'zbekiston va undan tashqaridagi biznes uchun veb-ilovalar, mobil ilovalar, 3D vizualizatsiya va CRM tizimlarini ishlab chiqamiz."),
    ("about_team_title", "Natijaga olib boradigan jamoa"),
    ("about_team_desc", "Dizaynerlar, muhandislar va 3D rassomlar bitta jamoada ishlaydi: g'oya va prototipdan ishga tushirish va qo'llab-quvvatlashgacha."),
    ("about_highlight_1_title", "Mahsulotga yondashuv"),
    ("about_highlight_1_desc", "Texnologiyadan emas, biznes maqsadlari va ko'rsatkichlardan boshlaymiz."),
    ("about_highlight_2_title", "Zamonaviy stek"),
    ("about_highlight_2_desc", "Tez, xavfsiz va kengaytiriladigan yechimlar."),
    ("about_highlight_3_title", "Shaffoflik"),
    ("about_highlight_3_desc", "Aniq muddatlar, muntazam demo va ochiq muloqot."),
    ("about_metric_1_label", "Yillik tajriba"),
    ("about_metric_1_note", "2019 yildan beri bozorda"),
    ("about_metric_2_label", "Loyihalar"),
    ("about_metric_2_note", "turli sohalardagi mijozlar uchun"),
    ("about_metric_3_label", "Qo'llab-quvvatlash"),
    ("about_metric_3_value", "24/7"),
    ("about_metric_3_note", "ishga tushirilgandan keyin ham"),
    ("works_title", "Bizning ishlar"),
    ("works_description", "Biz faxrlanadigan loyihalar"),
    ("project_1_title", "Fruit Exim"),
    ("project_1_desc", "Katalog va buyurtma berish imkoniyatiga ega yangi mevalar internet-do'koni."),
    ("project_2_title", "DressHub"),
    ("project_2_desc", "Filtrlar, savat va shaxsiy kabinetga ega kiyim marketpleysi."),
    ("project_3_title", "Chester Frontline"),
    ("project_3_desc", "Xizmatlar taqdimotiga ega korporativ sayt."),
    ("project_4_title", "Future Engineers"),
    ("project_4_desc", "Muhandislarni tayyorlash uchun ta'lim platformasi."),
    ("project_5_title", "Training Academy"),
    ("project_5_desc", "Professional kurslar va treninglar platformasi."),
    ("project_6_title", "DalayOnGini"),
    ("project_6_desc", "Kreativ agentlik portfoliosi."),
    ("project_type_website", "Veb-sayt"),
    ("project_type_app", "Ilova"),
    ("project_type_3d", "3D"),
    ("project_type_crm", "CRM"),
    ("project_type_server", "Server"),
    ("project_type_elearning", "Onlayn ta'lim"),
    ("services_title", "Xizmatlar"),
    ("services_description", "Raqamli mahsulotlarni to'liq tsiklda ishlab chiqish"),
    ("service_1_title", "Veb-dasturlash"),
    ("service_1_desc", "Zamonaviy, kengaytiriladigan veb-ilovalar."),
    ("service_2_title", "Mobil ilovalar"),
    ("service_2_desc", "iOS va Android uchun native va krossplatforma ilovalar."),
    ("service_3_title", "3D vizualizatsiya"),
    ("service_3_desc", "Ajoyib 3D grafika va interaktiv yechimlar."),
    ("service_4_title", "CRM tizimlari"),
    ("service_4_desc", "Individual CRM tizimlari va server infratuzilmasi."),
    ("service_5_title", "Biznesni avtomatlashtirish"),
    ("service_5_desc", "Integratsiyalar va muntazam jarayonlarni avtomatlashtirish."),
    ("service_6_title", "IT-konsalting"),
    ("service_6_desc", "Audit, arxitektura va texnik qo'llab-quvvatlash."),
    ("contact_title", "Aloqa"),
    ("contact_tagline", "Ajoyib narsa yaratishga tayyormisiz? Biz bilan bog'laning."),
    ("contact_phone", "Telefon"),
    ("contact_email", "Pochta"),
    ("contact_telegram", "Telegram"),
    ("footer_description", "Toshkentdagi premium IT & 3D studiya."),
    ("footer_quick_links", "Navigatsiya"),
    ("footer_services", "Xizmatlar"),
    ("footer_contact_us", "Biz bilan bog'laning"),
    ("footer_follow_us", "Ijtimoiy tarmoqlarda"),
    ("footer_copyright", "© 2019 ShoShiy Studio"),
    ("footer_all_rights", "Barcha huquqlar himoyalangan."),
];

const UZ_CYRL: &[(&str, &str)] = &[
    ("nav_works", "Ишлар"),
    ("nav_services", "Хизматлар"),
    ("nav_about", "Биз ҳақимизда"),
    ("nav_contact", "Алоқа"),
    ("hero_subtitle", "Premium IT & 3D Studio"),
    ("hero_title", "Янги авлод рақамли ечимларини яратамиз"),
    ("hero_scroll", "Пастга"),
    ("btn_portfolio", "Ишларни кўриш"),
    ("btn_contact", "Биз билан боғланиш"),
    ("about_title", "Студия ҳақида"),
    ("about_desc", "Ўзбекистон ва ундан ташқаридаги бизнес учун веб-иловалар, мобил иловалар, 3D визуализация ва CRM тизимларини ишлаб чиқамиз."),
    ("about_team_title", "Натижага олиб борадиган жамоа"),
    ("about_team_desc", "Дизайнерлар, муҳандислар ва 3D рассомлар битта жамоада ишлайди: ғоя ва прототипдан ишга туширишгача."),
    ("about_highlight_1_title", "Маҳсулотга ёндашув"),
    ("about_highlight_1_desc", "Технологиядан эмас, бизнес мақсадларидан бошлаймиз."),
    ("about_highlight_2_title", "Замонавий стек"),
    ("about_highlight_2_desc", "Тез, хавфсиз ва кенгайтириладиган ечимлар."),
    ("about_highlight_3_title", "Шаффофлик"),
    ("about_highlight_3_desc", "Аниқ муддатлар, мунтазам демо ва очиқ мулоқот."),
    ("about_metric_1_label", "Йиллик тажриба"),
    ("about_metric_1_note", "2019 йилдан бери бозорда"),
    ("about_metric_2_label", "Лойиҳалар"),
    ("about_metric_2_note", "турли соҳалардаги мижозлар учун"),
    ("about_metric_3_label", "Қўллаб-қувватлаш"),
    ("about_metric_3_value", "24/7"),
    ("about_metric_3_note", "ишга туширилгандан кейин ҳам"),
    ("works_title", "Бизнинг ишлар"),
    ("works_description", "Биз фахрланадиган лойиҳалар"),
    ("project_1_title", "Fruit Exim"),
    ("project_1_desc", "Каталог ва буюртма бериш имкониятига эга янги мевалар интернет-дўкони."),
    ("project_2_title", "DressHub"),
    ("project_2_desc", "Фильтрлар, сават ва шахсий кабинетга эга кийим маркетплейси."),
    ("project_3_title", "Chester Frontline"),
    ("project_3_desc", "Хизматлар тақдимотига эга корпоратив сайт."),
    ("project_4_title", "Future Engineers"),
    ("project_4_desc", "Муҳандисларни тайёрлаш учун таълим платформаси."),
    ("project_5_title", "Training Academy"),
    ("project_5_desc", "Профессионал курслар ва тренинглар платформаси."),
    ("project_6_title", "DalayOnGini"),
    ("project_6_desc", "Креатив агентлик портфолиоси."),
    ("project_type_website", "Веб-сайт"),
    ("project_type_app", "Илова"),
    ("project_type_3d", "3D"),
    ("project_type_crm", "CRM"),
    ("project_type_server", "Сервер"),
    ("project_type_elearning", "Онлайн таълим"),
    ("services_title", "Хизматлар"),
    ("services_description", "Рақамли маҳсулотларни тўлиқ циклда ишлаб чиқиш"),
    ("service_1_title", "Веб-дастурлаш"),
    ("service_1_desc", "Замонавий, кенгайтириладиган веб-иловалар."),
    ("service_2_title", "Мобил иловалар"),
    ("service_2_desc", "iOS ва Android учун натив ва кроссплатформа иловалар."),
    ("service_3_title", "3D визуализация"),
    ("service_3_desc", "Ажойиб 3D графика ва интерактив ечимлар."),
    ("service_4_title", "CRM тизимлари"),
    ("service_4_desc", "Индивидуал CRM тизимлари ва сервер инфратузилмаси."),
    ("service_5_title", "Бизнесни автоматлаштириш"),
    ("service_5_desc", "Интеграциялар ва мунтазам жараёнларни автоматлаштириш."),
    ("service_6_title", "IT-консалтинг"),
    ("service_6_desc", "Аудит, архитектура ва техник қўллаб-қувватлаш."),
    ("contact_title", "Алоқа"),
    ("contact_tagline", "Ажойиб нарса яратишга тайёрмисиз? Биз билан боғланинг."),
    ("contact_phone", "Телефон"),
    ("contact_email", "Почта"),
    ("contact_telegram", "Telegram"),
    ("footer_description", "Тошкентдаги премиум IT & 3D студия."),
    ("footer_quick_links", "Навигация"),
    ("footer_services", "Хизматлар"),
    ("footer_contact_us", "Биз билан боғланинг"),
    ("footer_follow_us", "Ижтимоий тармоқларда"),
    ("footer_copyright", "© 2019 ShoShiy Studio"),
    ("footer_all_rights", "Барча ҳуқуқлар ҳимояланган."),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_covers_the_default_table() {
        for lang in Language::ALL {
            for key in keys() {
                assert!(has_key(lang, key), "{} is missing {key}", lang.code());
            }
        }
    }

    #[test]
    fn missing_key_falls_back_to_the_key() {
        assert_eq!(translate(Language::Uz, "no_such_key"), "no_such_key");
    }

    #[test]
    fn lookup_is_per_language() {
        assert_eq!(translate(Language::Ru, "nav_works"), "Работы");
        assert_eq!(translate(Language::Uz, "nav_works"), "Ishlar");
        assert_eq!(translate(Language::UzCyrl, "nav_works"), "Ишлар");
    }

    #[test]
    fn cyrillic_tagline_is_written_in_one_script() {
        let tagline = translate(Language::UzCyrl, "contact_tagline");
        assert!(!tagline.chars().any(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("uz-Cyrl"), Some(Language::UzCyrl));
        assert_eq!(Language::from_code("en"), None);
    }

    #[test]
    fn serde_uses_short_codes() {
        let json = serde_json::to_string(&Language::UzCyrl).unwrap();
        assert_eq!(json, "\"uz-cy\"");
        let lang: Language = serde_json::from_str("\"uz\"").unwrap();
        assert_eq!(lang, Language::Uz);
    }
}
